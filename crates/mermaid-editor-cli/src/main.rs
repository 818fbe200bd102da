use anyhow::{Context, Result, bail};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use mermaid_editor_config::Config;
use mermaid_editor_engine::{RenderOutcome, Session, format_bytes, format_file, read_source};
use mermaid_editor_syntax::{HighlightTheme, tokenize};
use std::{
    env,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process,
    time::Duration,
};

/// Upper bound on how long `render` waits for the external renderer.
const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Format,
    Highlight,
    Render,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    command: Command,
    /// `None` reads stdin
    file: Option<PathBuf>,
    write: bool,
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let command = match args.first().map(String::as_str) {
        Some("format") => Command::Format,
        Some("highlight") => Command::Highlight,
        Some("render") => Command::Render,
        Some(other) => return Err(format!("Unknown command '{other}'")),
        None => return Err("Missing command".to_string()),
    };

    let mut file = None;
    let mut write = false;
    for arg in &args[1..] {
        match arg.as_str() {
            "--write" | "-w" => write = true,
            "-" if file.is_none() => file = Some(None),
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("Unknown option '{flag}'"));
            }
            path if file.is_none() => file = Some(Some(PathBuf::from(path))),
            extra => return Err(format!("Unexpected argument '{extra}'")),
        }
    }
    let file = file.flatten();

    if write && command != Command::Format {
        return Err("--write only applies to format".to_string());
    }
    if write && file.is_none() {
        return Err("--write needs a file, not stdin".to_string());
    }

    Ok(Invocation {
        command,
        file,
        write,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mermaid-editor-cli");

    let invocation = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Usage: {program} <format|highlight|render> [FILE|-] [--write]");
            process::exit(1);
        }
    };

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Config file location: {}", Config::config_path().display());
            process::exit(1);
        }
    };

    if let Err(e) = run(&invocation, &config) {
        log::error!("{e:#}");
        process::exit(1);
    }
    Ok(())
}

fn run(invocation: &Invocation, config: &Config) -> Result<()> {
    match invocation.command {
        Command::Format => format(invocation, config),
        Command::Highlight => {
            let source = read_text(invocation.file.as_deref())?;
            let theme = config.theme()?;
            let mut stdout = io::stdout().lock();
            write_highlighted(&mut stdout, &source, &theme)?;
            stdout.flush()?;
            Ok(())
        }
        Command::Render => {
            let source = read_text(invocation.file.as_deref())?;
            let svg = render(&source, config)?;
            println!("{svg}");
            Ok(())
        }
    }
}

fn format(invocation: &Invocation, config: &Config) -> Result<()> {
    let options = config.format_options()?;

    if invocation.write
        && let Some(path) = &invocation.file
    {
        let changed = format_file(path, &options)?;
        log::info!(
            "{} {}",
            if changed { "Formatted" } else { "Already formatted" },
            path.display()
        );
        return Ok(());
    }

    let bytes = read_input(invocation.file.as_deref())?;
    let formatted = format_bytes(&bytes, &options)?;
    println!("{formatted}");
    Ok(())
}

fn render(source: &str, config: &Config) -> Result<String> {
    let renderer = config.renderer();
    log::debug!("Rendering with {} {:?}", renderer.program(), renderer.args());

    let mut session = Session::new(
        source,
        renderer,
        config.debounce(),
        config.format_options()?,
    );
    match session.wait(RENDER_TIMEOUT) {
        Some(RenderOutcome::Applied) => session
            .svg()
            .map(str::to_string)
            .context("Renderer produced no output"),
        Some(_) => bail!(
            "Render failed: {}",
            session.last_error().unwrap_or("unknown error")
        ),
        None => bail!("Renderer did not finish within {RENDER_TIMEOUT:?}"),
    }
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(read_source(path)?),
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            Ok(bytes)
        }
    }
}

fn read_text(file: Option<&Path>) -> Result<String> {
    String::from_utf8(read_input(file)?).context("Input is not valid UTF-8")
}

fn write_highlighted<W: Write>(out: &mut W, source: &str, theme: &HighlightTheme) -> Result<()> {
    for token in tokenize(source) {
        match theme.color(token.category) {
            Some(rgb) => queue!(
                out,
                SetForegroundColor(Color::Rgb {
                    r: rgb.r,
                    g: rgb.g,
                    b: rgb.b,
                }),
                Print(token.text),
                ResetColor
            )?,
            None => queue!(out, Print(token.text))?,
        }
    }
    Ok(())
}
