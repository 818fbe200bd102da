//! # mermaid-editor-syntax
//!
//! A streaming tokenizer for the [Mermaid] diagram language, built on
//! [Logos], for syntax highlighting in an editor.
//!
//! [Mermaid]: https://mermaid.js.org
//! [Logos]: https://docs.rs/logos
//!
//! ## How Editors Use It
//!
//! Editor widgets style text one line at a time and ask for one token per
//! call. [`scan_token`] is exactly that entry point: given a line, a byte
//! position and a [`ScanState`], it returns the next classified [`Token`]
//! and the state to pass to the following call. Nothing is stored between
//! calls, so the scanner can be driven from any number of places at once.
//!
//! ```text
//! "subgraph A"  →  [Keyword("subgraph"), Plain(" "), Plain("A")]
//! "A-->|ok|B"   →  [Plain("A"), Operator("-->"), Operator("|"), ... ]
//! ```
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input lands in exactly one token. Characters no rule
//! recognises come out one at a time as [`Category::Plain`], so the
//! tokenizer has no error path:
//!
//! ```
//! use mermaid_editor_syntax::tokenize;
//!
//! let input = "graph TD\n  A[\"start\"] --> B\n";
//! let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
//! assert_eq!(rebuilt, input);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! mermaid-editor-syntax/
//! ├── lib.rs        # This file - public API and property tests
//! ├── category.rs   # Category enum (lexical classes)
//! ├── lexer.rs      # Logos rules that apply anywhere on a line
//! ├── scanner.rs    # scan_token, LineScanner, tokenize (keywords live here)
//! └── highlight.rs  # Category → colour table and highlight spans
//! ```

pub mod category;
pub mod highlight;
pub mod lexer;
pub mod scanner;

pub use category::Category;
pub use highlight::{ColorParseError, HighlightSpan, HighlightTheme, Rgb, highlight};
pub use scanner::{KEYWORDS, LineScanner, Quote, ScanState, Token, scan_token, tokenize, tokenize_line};
