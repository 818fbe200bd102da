//! # Formatter - Block-Aware Re-Indentation
//!
//! The "Format Code" action: trims every line, drops blank lines and
//! re-indents the rest by block depth.
//!
//! ## Algorithm
//!
//! A single pass with one register, `depth`:
//!
//! 1. A line starting with the word `end` closes a block first:
//!    `depth = depth.saturating_sub(1)`.
//! 2. The line is rendered at the current depth.
//! 3. A line starting with `subgraph` or `group` opens a block afterwards:
//!    `depth += 1`.
//!
//! So an opener sits at the outer level, its body one level deeper and the
//! closing `end` back at the outer level:
//!
//! ```
//! use mermaid_editor_engine::formatting::{FormatOptions, format_source};
//!
//! let formatted = format_source("subgraph A\nx-->y\nend", &FormatOptions::default());
//! assert_eq!(formatted, "subgraph A\n  x-->y\nend");
//! ```
//!
//! ## Policy Notes
//!
//! - Blank lines are removed, not preserved.
//! - There is one generic `end` for every kind of block. Balance is not
//!   checked: surplus `end` lines clamp at depth zero and unclosed blocks
//!   leave the remaining lines indented.
//! - The output has no trailing newline.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Spaces per nesting level unless configured otherwise.
pub const DEFAULT_INDENT_SIZE: usize = 2;

/// Largest accepted indent size.
pub const MAX_INDENT_SIZE: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Indent size must be between 1 and {MAX_INDENT_SIZE}, got {0}")]
    InvalidIndentSize(usize),
    #[error("Source is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Formatter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    indent_size: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_size: DEFAULT_INDENT_SIZE,
        }
    }
}

impl FormatOptions {
    pub fn new(indent_size: usize) -> Result<Self, FormatError> {
        if !(1..=MAX_INDENT_SIZE).contains(&indent_size) {
            return Err(FormatError::InvalidIndentSize(indent_size));
        }
        Ok(Self { indent_size })
    }

    pub fn indent_size(&self) -> usize {
        self.indent_size
    }
}

/// How a trimmed line affects block depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts with `subgraph` or `group`
    Opener,
    /// Starts with `end`
    Closer,
    Other,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        static OPENER: OnceLock<Regex> = OnceLock::new();
        static CLOSER: OnceLock<Regex> = OnceLock::new();

        // ASCII word boundary: `endé` still closes a block
        let closer =
            CLOSER.get_or_init(|| Regex::new(r"^end(?-u:\b)").expect("Invalid closer regex"));
        let opener = OPENER.get_or_init(|| {
            Regex::new(r"^(subgraph|group)(?-u:\b)").expect("Invalid opener regex")
        });

        if closer.is_match(line) {
            LineKind::Closer
        } else if opener.is_match(line) {
            LineKind::Opener
        } else {
            LineKind::Other
        }
    }
}

/// Nesting depth during one formatting pass. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentState {
    depth: usize,
}

impl IndentState {
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Render one trimmed line, updating the depth around it.
    pub fn render_line(&mut self, line: &str, options: &FormatOptions) -> String {
        let kind = LineKind::classify(line);
        if kind == LineKind::Closer {
            self.depth = self.depth.saturating_sub(1);
        }

        let mut rendered = " ".repeat(self.depth * options.indent_size);
        rendered.push_str(line);

        if kind == LineKind::Opener {
            self.depth += 1;
        }
        rendered
    }
}

/// Re-indent `source`. Total: every input produces output.
pub fn format_source(source: &str, options: &FormatOptions) -> String {
    let mut state = IndentState::default();
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| state.render_line(line, options))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Re-indent raw bytes, failing if they are not UTF-8.
pub fn format_bytes(bytes: &[u8], options: &FormatOptions) -> Result<String, FormatError> {
    let source = std::str::from_utf8(bytes)?;
    Ok(format_source(source, options))
}
