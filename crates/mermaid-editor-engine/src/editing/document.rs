use std::ops::Range;

use mermaid_editor_syntax::{HighlightSpan, highlight};
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::Patch;
use crate::formatting::{FormatOptions, format_source};

/// The diagram source being edited.
///
/// Document plays the editor-widget side of the core:
///
/// ## 1. Single Source of Truth (xi-rope buffer)
/// - The whole diagram lives in one `xi_rope::Rope`
/// - The tokenizer and formatter only ever see `&str` views of it
///
/// ## 2. Change Events
/// - Every mutation goes through [`Document::edit`] and yields a [`Patch`]
/// - The version counter increases once per effective change, so render
///   requests can be tagged with it
///
/// ## 3. Whole-Buffer Replacement
/// - [`Document::format`] computes the formatted text completely before
///   touching the buffer, then swaps it in with one [`Document::replace_all`]
/// - A formatting pass can therefore never leave a half-edited buffer
///
/// ```rust
/// # use mermaid_editor_engine::editing::Document;
/// # use mermaid_editor_engine::formatting::FormatOptions;
/// let mut doc = Document::new("subgraph A\nx-->y\nend");
/// let patch = doc.format(&FormatOptions::default());
///
/// assert_eq!(doc.text(), "subgraph A\n  x-->y\nend");
/// assert_eq!(patch.version, 1);
/// ```
pub struct Document {
    /// xi-rope buffer containing the diagram source
    pub(crate) buffer: Rope,
    /// Current selection/cursor position as byte offsets in buffer
    pub(crate) selection: Range<usize>,
    /// Version counter incremented on each effective edit
    pub(crate) version: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

impl Document {
    pub fn new(text: &str) -> Self {
        let buffer = Rope::from(text);
        let len = buffer.len();
        Self {
            buffer,
            selection: len..len, // Start with cursor at end
            version: 0,
        }
    }

    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    /// Replace `range` with `text`.
    ///
    /// The range is clamped to the buffer and both ends are moved back to
    /// the nearest character boundary. The cursor ends up after the
    /// inserted text. Replacing text with identical text is a no-op and
    /// does not bump the version.
    pub fn edit(&mut self, range: Range<usize>, text: &str) -> Patch {
        let len = self.buffer.len();
        let (start, end) = self.clamp_range(range);

        if self.buffer.slice_to_cow(start..end) == text {
            return self.unchanged();
        }

        let delta: Delta<RopeInfo> = Delta::simple_edit(start..end, Rope::from(text), len);
        self.buffer = delta.apply(&self.buffer);
        self.version += 1;

        let cursor = start + text.len();
        self.selection = cursor..cursor;

        log::debug!(
            "edit {start}..{end} -> {} bytes, version {}",
            text.len(),
            self.version
        );

        Patch {
            changed: vec![start..cursor],
            new_selection: self.selection.clone(),
            version: self.version,
        }
    }

    /// Replace the entire buffer contents in one mutation.
    pub fn replace_all(&mut self, text: &str) -> Patch {
        let patch = self.edit(0..self.buffer.len(), text);
        if !patch.is_noop() {
            // Whole-buffer replacement resets the cursor to the start
            self.selection = 0..0;
        }
        Patch {
            new_selection: self.selection.clone(),
            ..patch
        }
    }

    /// The "Format Code" action.
    pub fn format(&mut self, options: &FormatOptions) -> Patch {
        let formatted = format_source(&self.text(), options);
        self.replace_all(&formatted)
    }

    /// Highlight spans for the current text.
    pub fn highlight(&self) -> Vec<HighlightSpan> {
        highlight(&self.text())
    }

    /// Get the current selection range
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Set the selection range, clamped to the buffer and to character
    /// boundaries
    pub fn set_selection(&mut self, selection: Range<usize>) {
        let (start, end) = self.clamp_range(selection);
        self.selection = start..end;
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Get the buffer length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    fn clamp_range(&self, range: Range<usize>) -> (usize, usize) {
        let start = self.char_boundary_at_or_before(range.start);
        let end = self.char_boundary_at_or_before(range.end).max(start);
        (start, end)
    }

    fn char_boundary_at_or_before(&self, offset: usize) -> usize {
        let len = self.buffer.len();
        if offset >= len {
            return len;
        }
        self.buffer.at_or_prev_codepoint_boundary(offset).unwrap_or(0)
    }

    fn unchanged(&self) -> Patch {
        Patch {
            changed: Vec::new(),
            new_selection: self.selection.clone(),
            version: self.version,
        }
    }
}
