pub mod editing;
pub mod formatting;
pub mod io;
pub mod render;
pub mod session;

// Re-export key types for easier usage
pub use editing::{Document, Patch};
pub use formatting::{FormatError, FormatOptions, format_bytes, format_source};
pub use io::*;
pub use render::{CommandRenderer, RenderError, RenderOutcome, RenderQueue, Renderer};
pub use session::Session;
