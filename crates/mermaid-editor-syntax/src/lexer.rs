//! # Lexer - Context-Free Token Rules
//!
//! The position-independent part of the Mermaid tokenizer, generated with
//! [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## What Lives Here
//!
//! Every rule that can fire anywhere on a line: connectors, brackets, quoted
//! strings, colon-qualified names and numbers. Keywords are only recognised
//! at the start of a line, which Logos cannot express, so they live in the
//! [`scanner`](crate::scanner) module instead.
//!
//! ## One Token at a Time
//!
//! The scanner never lets Logos run over a whole line. It lexes the
//! remainder of the line and keeps only the first token, because a miss must
//! consume exactly one character - not whatever span Logos chose to report
//! for its error:
//!
//! ```
//! use mermaid_editor_syntax::Category;
//! use mermaid_editor_syntax::lexer::match_rule;
//!
//! assert_eq!(match_rule("-->B"), Some((Category::Operator, 3)));
//! assert_eq!(match_rule("\"a\" \"b\""), Some((Category::String, 3)));
//! assert_eq!(match_rule("A-->B"), None);
//! ```
//!
//! ## Overlap Between Rules
//!
//! Logos picks the longest match, while the tokenizer contract is "first rule
//! wins". The two agree here because no two rules can start on the same
//! character except names and numbers. There the colon-qualified name is
//! both the earlier rule and the longer match, but Logos does not fall back
//! to the shorter number once it has committed to a name that then fails
//! (`123abc`), so [`match_rule`] retries a leading digit run itself:
//!
//! ```
//! use mermaid_editor_syntax::Category;
//! use mermaid_editor_syntax::lexer::match_rule;
//!
//! assert_eq!(match_rule("123abc"), Some((Category::Number, 3)));
//! assert_eq!(match_rule("12:ab"), Some((Category::Identifier, 5)));
//! ```

use logos::Logos;

use crate::category::Category;

/// Token kinds produced by the Logos lexer.
///
/// Each variant maps onto a [`Category`]. Strings have one variant per
/// delimiter so the scanner can tell which quote closed the run.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    /// Connectors, listed longest first
    #[token("-.->")]
    #[token("-->")]
    #[token("---")]
    #[token("==>")]
    #[token("|")]
    Operator,

    #[regex(r"[\[\](){}]")]
    Bracket,

    /// `"..."`, closed by the first following `"`
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// `'...'`, closed by the first following `'`
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// `` `...` ``, closed by the first following backtick
    #[regex(r"`[^`]*`")]
    BacktickQuoted,

    /// `word:word-or-hyphen`, e.g. an icon reference like `logos:aws-ecs`
    #[regex(r"[A-Za-z0-9_]+:[-A-Za-z0-9_]+")]
    QualifiedName,

    #[regex(r"[0-9]+")]
    Number,
}

impl RawToken {
    /// Convert to the highlighting category.
    pub fn category(self) -> Category {
        match self {
            RawToken::Operator => Category::Operator,
            RawToken::Bracket => Category::Bracket,
            RawToken::DoubleQuoted | RawToken::SingleQuoted | RawToken::BacktickQuoted => {
                Category::String
            }
            RawToken::QualifiedName => Category::Identifier,
            RawToken::Number => Category::Number,
        }
    }
}

/// Match the first context-free rule at the start of `rest`.
///
/// Returns the category and the byte length of the match, or `None` when no
/// rule matches (the caller then falls back to a single character).
pub fn match_rule(rest: &str) -> Option<(Category, usize)> {
    let mut lexer = RawToken::lexer(rest);
    match lexer.next()? {
        Ok(raw) => Some((raw.category(), lexer.span().end)),
        Err(()) => leading_digits(rest).map(|len| (Category::Number, len)),
    }
}

/// Length of the ASCII digit run at the start of `rest`, if any.
fn leading_digits(rest: &str) -> Option<usize> {
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    (len > 0).then_some(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-->", 3)]
    #[case("---", 3)]
    #[case("==>", 3)]
    #[case("-.->", 4)]
    #[case("|", 1)]
    fn operators(#[case] input: &str, #[case] len: usize) {
        assert_eq!(match_rule(input), Some((Category::Operator, len)));
    }

    #[test]
    fn arrow_is_not_fragmented() {
        assert_eq!(match_rule("-->y"), Some((Category::Operator, 3)));
        assert_eq!(match_rule("--->"), Some((Category::Operator, 3)));
    }

    #[test]
    fn lone_dash_is_no_rule() {
        assert_eq!(match_rule("- x"), None);
        assert_eq!(match_rule("->"), None);
    }

    #[rstest]
    #[case("[")]
    #[case("]")]
    #[case("(")]
    #[case(")")]
    #[case("{")]
    #[case("}")]
    fn brackets_are_single_characters(#[case] input: &str) {
        assert_eq!(match_rule(input), Some((Category::Bracket, 1)));
    }

    #[test]
    fn double_brackets_are_two_tokens() {
        assert_eq!(match_rule("[["), Some((Category::Bracket, 1)));
    }

    #[rstest]
    #[case("\"a\" \"b\"", 3)]
    #[case("'it' 's'", 4)]
    #[case("`x` `y`", 3)]
    #[case("\"\"", 2)]
    fn strings_close_at_first_delimiter(#[case] input: &str, #[case] len: usize) {
        assert_eq!(match_rule(input), Some((Category::String, len)));
    }

    #[test]
    fn mixed_quotes_do_not_close_each_other() {
        assert_eq!(match_rule("\"it's\""), Some((Category::String, 6)));
    }

    #[test]
    fn unclosed_string_is_no_rule() {
        assert_eq!(match_rule("\"open"), None);
    }

    #[test]
    fn qualified_names() {
        assert_eq!(
            match_rule("logos:aws-ecs)"),
            Some((Category::Identifier, 13))
        );
        assert_eq!(match_rule("db:L -- R"), Some((Category::Identifier, 4)));
    }

    #[test]
    fn plain_word_is_no_rule() {
        assert_eq!(match_rule("server"), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(match_rule("42 items"), Some((Category::Number, 2)));
        assert_eq!(match_rule("7x"), Some((Category::Number, 1)));
    }

    #[rstest]
    #[case("123abc", 3)]
    #[case("1a", 1)]
    #[case("12_", 2)]
    #[case("7:", 1)]
    #[case("42-x", 2)]
    fn digits_followed_by_word_chars_are_numbers(#[case] input: &str, #[case] len: usize) {
        assert_eq!(match_rule(input), Some((Category::Number, len)));
    }

    #[test]
    fn digits_inside_a_word_are_not_numbers() {
        assert_eq!(match_rule("x1y"), None);
    }

    #[test]
    fn digits_before_colon_form_a_name() {
        assert_eq!(match_rule("12:ab"), Some((Category::Identifier, 5)));
    }

    #[test]
    fn empty_input() {
        assert_eq!(match_rule(""), None);
    }
}
