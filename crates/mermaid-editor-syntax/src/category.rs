//! Lexical categories assigned to Mermaid tokens.
//!
//! Every byte of a line ends up in a token of exactly one category. The
//! highlighting layer maps categories to colours; [`Category::Plain`] is the
//! only category that is never painted.

/// The highlighting class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Diagram-type declarations and block keywords at the start of a line
    /// (`graph`, `subgraph`, `end`, `architecture-beta`, ...)
    Keyword,
    /// Connectors: `-->`, `---`, `==>`, `-.->` and `|`
    Operator,
    /// One of `[`, `]`, `(`, `)`, `{`, `}`
    Bracket,
    /// Quoted text in double quotes, single quotes or backticks
    String,
    /// Colon-qualified names such as `logos:aws-ecs`
    Identifier,
    /// A run of ASCII digits
    Number,
    /// Anything else, one character at a time; no highlighting applied
    Plain,
}

impl Category {
    /// All categories that carry a highlight style, in table order.
    pub const STYLED: [Category; 6] = [
        Category::Keyword,
        Category::Operator,
        Category::Bracket,
        Category::String,
        Category::Identifier,
        Category::Number,
    ];

    /// Token name used by stream-language editor widgets.
    ///
    /// Identifiers are reported as `variable`, matching the highlight tag
    /// editors use for variable names.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Category::Keyword => Some("keyword"),
            Category::Operator => Some("operator"),
            Category::Bracket => Some("bracket"),
            Category::String => Some("string"),
            Category::Identifier => Some("variable"),
            Category::Number => Some("number"),
            Category::Plain => None,
        }
    }

    /// Returns true if the highlighting layer paints this category.
    pub fn is_styled(self) -> bool {
        self != Category::Plain
    }
}
