//! Highlight style table.
//!
//! Maps each styled [`Category`] to a colour. Hosts paint the spans returned
//! by [`highlight`] with [`HighlightTheme::color`]; plain text keeps the
//! theme foreground.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use thiserror::Error;

use crate::category::Category;
use crate::scanner::tokenize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Colour must look like #RRGGBB, got {0:?}")]
    BadFormat(String),
    #[error("Invalid hex digits in colour {0:?}")]
    BadHex(String),
}

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| ColorParseError::BadFormat(s.to_string()))?;

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorParseError::BadHex(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colours for every styled category plus the editor base colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightTheme {
    pub keyword: Rgb,
    pub operator: Rgb,
    pub bracket: Rgb,
    pub string: Rgb,
    pub variable: Rgb,
    pub number: Rgb,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl Default for HighlightTheme {
    fn default() -> Self {
        Self::monokai()
    }
}

impl HighlightTheme {
    /// Monokai-inspired dark theme.
    pub fn monokai() -> Self {
        Self {
            keyword: Rgb::new(0xF9, 0x26, 0x72),
            operator: Rgb::new(0xF9, 0x26, 0x72),
            bracket: Rgb::new(0xFF, 0xFF, 0xFF),
            string: Rgb::new(0xE6, 0xDB, 0x74),
            variable: Rgb::new(0x66, 0xD9, 0xEF),
            number: Rgb::new(0xAE, 0x81, 0xFF),
            background: Rgb::new(0x27, 0x28, 0x22),
            foreground: Rgb::new(0xF8, 0xF8, 0xF2),
        }
    }

    /// Colour for a category; `None` for [`Category::Plain`].
    pub fn color(&self, category: Category) -> Option<Rgb> {
        match category {
            Category::Keyword => Some(self.keyword),
            Category::Operator => Some(self.operator),
            Category::Bracket => Some(self.bracket),
            Category::String => Some(self.string),
            Category::Identifier => Some(self.variable),
            Category::Number => Some(self.number),
            Category::Plain => None,
        }
    }

    /// Mutable access to a category's colour slot, for overrides.
    pub fn color_mut(&mut self, category: Category) -> Option<&mut Rgb> {
        match category {
            Category::Keyword => Some(&mut self.keyword),
            Category::Operator => Some(&mut self.operator),
            Category::Bracket => Some(&mut self.bracket),
            Category::String => Some(&mut self.string),
            Category::Identifier => Some(&mut self.variable),
            Category::Number => Some(&mut self.number),
            Category::Plain => None,
        }
    }

    /// The token table: `(tag, colour)` for every styled category.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Rgb)> + '_ {
        Category::STYLED
            .into_iter()
            .filter_map(|category| Some((category.tag()?, self.color(category)?)))
    }
}

/// A span of source text to paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Byte range in the source
    pub range: Range<usize>,
    pub category: Category,
}

/// Highlight a whole source, returning spans for every styled token.
pub fn highlight(source: &str) -> Vec<HighlightSpan> {
    tokenize(source)
        .into_iter()
        .filter(|token| token.category.is_styled())
        .map(|token| HighlightSpan {
            range: token.span,
            category: token.category,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_color() {
        assert_eq!("#F92672".parse::<Rgb>(), Ok(Rgb::new(0xF9, 0x26, 0x72)));
        assert_eq!("#e6db74".parse::<Rgb>(), Ok(Rgb::new(0xE6, 0xDB, 0x74)));
    }

    #[test]
    fn parse_color_rejects_bad_input() {
        assert_eq!(
            "F92672".parse::<Rgb>(),
            Err(ColorParseError::BadFormat("F92672".to_string()))
        );
        assert_eq!(
            "#F9267".parse::<Rgb>(),
            Err(ColorParseError::BadFormat("#F9267".to_string()))
        );
        assert_eq!(
            "#GG2672".parse::<Rgb>(),
            Err(ColorParseError::BadHex("#GG2672".to_string()))
        );
    }

    #[test]
    fn display_is_uppercase_hex() {
        assert_eq!(Rgb::new(0xAE, 0x81, 0xFF).to_string(), "#AE81FF");
    }

    #[test]
    fn monokai_table() {
        let theme = HighlightTheme::monokai();
        let table: Vec<_> = theme
            .entries()
            .map(|(tag, color)| (tag, color.to_string()))
            .collect();
        assert_eq!(
            table,
            vec![
                ("keyword", "#F92672".to_string()),
                ("operator", "#F92672".to_string()),
                ("bracket", "#FFFFFF".to_string()),
                ("string", "#E6DB74".to_string()),
                ("variable", "#66D9EF".to_string()),
                ("number", "#AE81FF".to_string()),
            ]
        );
    }

    #[test]
    fn plain_is_unstyled() {
        assert_eq!(HighlightTheme::default().color(Category::Plain), None);
    }

    #[test]
    fn override_color() {
        let mut theme = HighlightTheme::monokai();
        *theme.color_mut(Category::Number).unwrap() = Rgb::new(1, 2, 3);
        assert_eq!(theme.color(Category::Number), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn highlight_skips_plain_text() {
        let spans = highlight("graph TD\nA-->B");
        assert_eq!(
            spans,
            vec![
                HighlightSpan {
                    range: 0..5,
                    category: Category::Keyword,
                },
                HighlightSpan {
                    range: 10..13,
                    category: Category::Operator,
                },
            ]
        );
    }
}
