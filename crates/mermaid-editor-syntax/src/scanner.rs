//! # Scanner - Line-at-a-Time Tokenizing
//!
//! The entry point editor widgets call while painting a line: one call, one
//! token. The scanner is a plain function over `(line, position, state)`,
//! so it is reentrant and any caller can drive it.
//!
//! ```
//! use mermaid_editor_syntax::{Category, ScanState, scan_token};
//!
//! let line = "subgraph A";
//! let (token, state) = scan_token(line, 0, ScanState::default()).unwrap();
//! assert_eq!(token.category, Category::Keyword);
//! assert_eq!(token.text, "subgraph");
//!
//! let (token, _) = scan_token(line, token.span.end, state).unwrap();
//! assert_eq!(token.category, Category::Plain);
//! assert_eq!(token.text, " ");
//! ```
//!
//! ## Rule Order
//!
//! 1. Keyword (start of line only)
//! 2. Operator
//! 3. Bracket
//! 4. String
//! 5. Identifier
//! 6. Number
//! 7. One character of [`Category::Plain`]
//!
//! Rules 2-6 come from the Logos lexer in [`crate::lexer`].

use std::ops::Range;

use crate::category::Category;
use crate::lexer::match_rule;

/// Keywords recognised at the start of a line. Matching is exact.
pub const KEYWORDS: [&str; 14] = [
    "graph",
    "flowchart",
    "sequenceDiagram",
    "classDiagram",
    "stateDiagram",
    "erDiagram",
    "pie",
    "gantt",
    "journey",
    "subgraph",
    "end",
    "architecture-beta",
    "group",
    "service",
];

/// Which delimiter opened the string being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    Double,
    Single,
    Backtick,
}

/// Per-line scanner state, passed into and returned from [`scan_token`].
///
/// Strings always close on the line they open, so a fresh state is all a
/// new line needs. The fields are kept so constructs that do span calls can
/// be added without changing the entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScanState {
    pub in_string: bool,
    pub string_type: Option<Quote>,
}

/// A classified slice of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub category: Category,
    pub text: &'a str,
    /// Byte range of `text` in the scanned input
    pub span: Range<usize>,
}

/// Scan one token of `line` starting at byte `pos`.
///
/// Returns `None` once `pos` reaches the end of the line. `pos` must lie on
/// a character boundary, which holds for every position this function
/// hands back through `token.span.end`.
pub fn scan_token(line: &str, pos: usize, state: ScanState) -> Option<(Token<'_>, ScanState)> {
    let rest = line.get(pos..).filter(|rest| !rest.is_empty())?;

    let (category, len) = if pos == 0
        && let Some(len) = match_keyword(rest)
    {
        (Category::Keyword, len)
    } else if let Some(matched) = match_rule(rest) {
        matched
    } else {
        // Fallback: exactly one character, never split inside a code point
        let len = rest.chars().next().map_or(1, char::len_utf8);
        (Category::Plain, len)
    };

    let end = pos + len;
    let token = Token {
        category,
        text: &line[pos..end],
        span: pos..end,
    };
    Some((token, state))
}

/// Match a start-of-line keyword, returning its length including any
/// leading whitespace.
///
/// The candidate is a run of word characters with at most one hyphen after
/// the first run (so `architecture-beta` is a single word). Words outside
/// [`KEYWORDS`] are rejected and the caller rescans from the same position.
fn match_keyword(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';

    // Unicode whitespace, so an indent containing NBSP still counts
    let start = rest.len() - rest.trim_start().len();
    let mut end = start + bytes[start..].iter().take_while(|&&b| is_word(b)).count();
    if end == start {
        return None;
    }
    if bytes.get(end) == Some(&b'-') {
        end += 1;
        end += bytes[end..].iter().take_while(|&&b| is_word(b)).count();
    }

    KEYWORDS.contains(&&rest[start..end]).then_some(end)
}

/// Iterator over the tokens of a single line.
///
/// Owns the state record for the line and threads it through
/// [`scan_token`]; dropping the scanner discards it.
#[derive(Debug, Clone)]
pub struct LineScanner<'a> {
    line: &'a str,
    pos: usize,
    state: ScanState,
}

impl<'a> LineScanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            pos: 0,
            state: ScanState::default(),
        }
    }

    /// Current byte position in the line.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn state(&self) -> ScanState {
        self.state
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (token, state) = scan_token(self.line, self.pos, self.state)?;
        self.pos = token.span.end;
        self.state = state;
        Some(token)
    }
}

/// Tokenize a single line (no newline handling).
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    LineScanner::new(line).collect()
}

/// Tokenize a whole multi-line source.
///
/// Each `\n` becomes its own [`Category::Plain`] token and starts a new line,
/// so keywords are eligible again right after it. Spans are offsets into
/// `source`; concatenating all token texts gives back `source` exactly.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    for segment in source.split_inclusive('\n') {
        let line = segment.strip_suffix('\n').unwrap_or(segment);

        tokens.extend(LineScanner::new(line).map(|token| Token {
            span: token.span.start + offset..token.span.end + offset,
            ..token
        }));

        if line.len() < segment.len() {
            let at = offset + line.len();
            tokens.push(Token {
                category: Category::Plain,
                text: &source[at..at + 1],
                span: at..at + 1,
            });
        }
        offset += segment.len();
    }

    tokens
}
