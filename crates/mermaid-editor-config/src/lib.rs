use mermaid_editor_engine::formatting::{
    DEFAULT_INDENT_SIZE, FormatError, FormatOptions, MAX_INDENT_SIZE,
};
use mermaid_editor_engine::render::CommandRenderer;
use mermaid_editor_syntax::{Category, ColorParseError, HighlightTheme, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_RENDER_COMMAND: &str = "mmdc";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid theme colour for {category}: {source}")]
    InvalidColor {
        category: &'static str,
        source: ColorParseError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: FormatConfig,
    pub render: RenderConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub indent_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_size: DEFAULT_INDENT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Program that reads diagram source on stdin and writes SVG to stdout
    pub command: String,
    pub args: Vec<String>,
    pub debounce_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_RENDER_COMMAND.to_string(),
            args: ["-i", "-", "-o", "-", "-e", "svg"]
                .into_iter()
                .map(String::from)
                .collect(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Per-category colour overrides as `#RRGGBB` strings. Unset categories
/// keep the built-in theme colour.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl ThemeConfig {
    fn overrides(&self) -> [(Category, Option<&str>); 6] {
        [
            (Category::Keyword, self.keyword.as_deref()),
            (Category::Operator, self.operator.as_deref()),
            (Category::Bracket, self.bracket.as_deref()),
            (Category::String, self.string.as_deref()),
            (Category::Identifier, self.variable.as_deref()),
            (Category::Number, self.number.as_deref()),
        ]
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the renderer command
        config.render.command =
            Self::expand_path(&config.render.command).unwrap_or(config.render.command);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load the config file, falling back to defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mermaid-editor");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn format_options(&self) -> Result<FormatOptions, FormatError> {
        FormatOptions::new(self.format.indent_size)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.render.debounce_ms)
    }

    pub fn renderer(&self) -> CommandRenderer {
        CommandRenderer::new(self.render.command.clone(), self.render.args.iter().cloned())
    }

    /// The built-in theme with this config's overrides applied.
    pub fn theme(&self) -> Result<HighlightTheme, ConfigError> {
        let mut theme = HighlightTheme::default();
        for (category, value) in self.theme.overrides() {
            let Some(value) = value else { continue };
            let color: Rgb = value.parse().map_err(|source| ConfigError::InvalidColor {
                category: category.tag().unwrap_or("plain"),
                source,
            })?;
            if let Some(slot) = theme.color_mut(category) {
                *slot = color;
            }
        }
        Ok(theme)
    }

    fn expand_path(path: &str) -> Option<String> {
        match shellexpand::full(path) {
            Ok(expanded) => Some(expanded.into_owned()),
            Err(_) => None,
        }
    }
}
