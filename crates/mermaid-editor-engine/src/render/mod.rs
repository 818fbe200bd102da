//! # Render Pipeline
//!
//! Turning diagram source into SVG is the job of an external engine (for
//! example mermaid-cli). This module owns everything around that call:
//!
//! - [`Renderer`]: the engine contract, `source -> Result<svg, RenderError>`
//! - [`CommandRenderer`]: a renderer that pipes source through a command
//! - [`RenderQueue`]: sequence-numbered requests, last write wins
//! - [`Debouncer`]: waits for a quiet period after edits before rendering
//! - [`RenderWorker`]: runs a renderer on a background thread
//!
//! A failed render is logged and the last good SVG stays on display.

pub mod command;
pub mod debounce;
pub mod queue;
pub mod worker;

pub use command::CommandRenderer;
pub use debounce::Debouncer;
pub use queue::{RenderOutcome, RenderQueue, RenderTicket};
pub use worker::{RenderJob, RenderResult, RenderWorker};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to start renderer '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("Renderer exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("Renderer output is not SVG markup")]
    NotSvg,
    #[error("Renderer output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Renderer IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Diagram rejected: {0}")]
    Rejected(String),
    #[error("Render worker has shut down")]
    WorkerGone,
}

/// The rendering engine contract: diagram source in, SVG markup out.
pub trait Renderer {
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&str) -> Result<String, RenderError>,
{
    fn render(&self, source: &str) -> Result<String, RenderError> {
        self(source)
    }
}
