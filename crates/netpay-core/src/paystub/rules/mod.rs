//! Rule-based field parsers for pay stub lines.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::NetPayParser;
pub use dates::ChequeDateParser;
pub use patterns::*;

use regex::Regex;

use super::Result;

/// Trait for single-field parsers.
pub trait FieldParser {
    /// The type of value this parser produces.
    type Output;

    /// Field name used in errors and warnings.
    fn field(&self) -> &'static str;

    /// Pattern identifying a line that carries this field.
    fn label(&self) -> &Regex;

    /// Parse the field value out of a matched line.
    fn parse(&self, line: &str) -> Result<Self::Output>;

    /// Parse an optional match. An absent line is an absent value, not an error.
    fn parse_optional(&self, line: Option<&str>) -> Result<Option<Self::Output>> {
        line.map(|l| self.parse(l)).transpose()
    }

    /// First line carrying this field's label.
    fn find_line<'a>(&self, lines: &'a [String]) -> Option<&'a str> {
        lines
            .iter()
            .map(String::as_str)
            .find(|line| self.label().is_match(line))
    }
}
