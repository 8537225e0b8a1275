//! Net pay amount parsing.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{NET_PAY_LABEL, PAY_KEYWORD};
use super::FieldParser;
use crate::error::ExtractionError;
use crate::paystub::Result;

/// Length of the "pay" keyword the payload is measured from.
const PAY_KEYWORD_LEN: usize = 3;

const CURRENCY_SYMBOLS: [char; 3] = ['$', '€', '£'];

/// Net pay field parser.
///
/// The payload runs from just after the "pay" keyword to the end of the
/// line. Stub layouts put a comma-grouped integer part before the first
/// `.`; only the first two digits after it are kept, so any trailing
/// fragment (`1,234.567`, `1,234.56.7`) is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetPayParser;

impl NetPayParser {
    pub fn new() -> Self {
        Self
    }
}

impl FieldParser for NetPayParser {
    type Output = Decimal;

    fn field(&self) -> &'static str {
        "net pay"
    }

    fn label(&self) -> &Regex {
        &NET_PAY_LABEL
    }

    fn parse(&self, line: &str) -> Result<Decimal> {
        let keyword = PAY_KEYWORD.find(line).ok_or_else(|| self.error(line))?;
        let payload = &line[keyword.start() + PAY_KEYWORD_LEN..];

        let mut segments = payload.split('.');
        let (negative, integer) =
            integer_digits(segments.next().unwrap_or_default()).ok_or_else(|| self.error(line))?;
        let fraction: String = segments
            .next()
            .map(|s| s.chars().take(2).collect())
            .unwrap_or_default();

        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(self.error(line));
        }

        let sign = if negative { "-" } else { "" };
        Decimal::from_str(&format!("{}{}.{:0<2}", sign, integer, fraction))
            .map_err(|_| self.error(line))
    }
}

/// Sign and digits of the integer part. Leading `:`, whitespace and
/// currency symbols are skipped and thousands separators dropped; any
/// other character, including a space between digits, rejects the amount.
fn integer_digits(segment: &str) -> Option<(bool, String)> {
    let skippable = |c: char| c == ':' || c.is_whitespace() || CURRENCY_SYMBOLS.contains(&c);

    let body = segment.trim_start_matches(skippable).trim_end();
    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start_matches(skippable)),
        None => (false, body),
    };

    let digits: String = body.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((negative, digits))
}

impl NetPayParser {
    fn error(&self, line: &str) -> ExtractionError {
        ExtractionError::Parse {
            field: self.field().to_string(),
            value: line.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_truncates_to_two_fraction_digits() {
        let parser = NetPayParser::new();
        assert_eq!(parser.parse("Net Pay: 1,234.567").unwrap(), dec("1234.56"));
    }

    #[test]
    fn test_parse_plain_layout() {
        let parser = NetPayParser::new();
        assert_eq!(parser.parse("Net Pay 2,345.67").unwrap(), dec("2345.67"));
        assert_eq!(parser.parse("NET PAY 987.10").unwrap(), dec("987.10"));
    }

    #[test]
    fn test_parse_drops_spurious_fragment() {
        let parser = NetPayParser::new();
        assert_eq!(parser.parse("Net Pay 12,345.67.89").unwrap(), dec("12345.67"));
    }

    #[test]
    fn test_parse_pads_missing_fraction() {
        let parser = NetPayParser::new();

        let whole = parser.parse("Net Pay 1,500").unwrap();
        assert_eq!(whole, dec("1500.00"));
        assert_eq!(whole.scale(), 2);

        let short = parser.parse("Net Pay 12.3").unwrap();
        assert_eq!(short.to_string(), "12.30");
    }

    #[test]
    fn test_parse_without_digits_fails() {
        let parser = NetPayParser::new();
        let err = parser.parse("Net Pay: see attached").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { .. }));
    }

    #[test]
    fn test_parse_keeps_negative_sign() {
        let parser = NetPayParser::new();
        assert_eq!(parser.parse("Net Pay -50.00").unwrap(), dec("-50.00"));
        assert_eq!(parser.parse("Net Pay: $-1,200.5").unwrap(), dec("-1200.50"));
        assert_eq!(parser.parse("Net Pay -$75.25").unwrap(), dec("-75.25"));
    }

    #[test]
    fn test_parse_skips_currency_symbol() {
        let parser = NetPayParser::new();
        assert_eq!(parser.parse("Net Pay: $ 2,000.00").unwrap(), dec("2000.00"));
    }

    #[test]
    fn test_parse_rejects_digits_split_by_space() {
        let parser = NetPayParser::new();
        let err = parser.parse("Net Pay 1 2.50").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { .. }));
    }

    #[test]
    fn test_parse_optional_absent_line() {
        let parser = NetPayParser::new();
        assert_eq!(parser.parse_optional(None).unwrap(), None);
        assert_eq!(
            parser.parse_optional(Some("Net Pay 10.00")).unwrap(),
            Some(dec("10.00"))
        );
    }

    #[test]
    fn test_find_line_requires_label_at_start() {
        let parser = NetPayParser::new();
        let lines = vec![
            "YTD Net Pay 9,000.00".to_string(),
            "Net Pay 1,000.00".to_string(),
        ];
        assert_eq!(parser.find_line(&lines), Some("Net Pay 1,000.00"));
    }
}
