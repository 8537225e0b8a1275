//! Cheque date parsing and normalization to `YYYYMMDD`.

use regex::Regex;

use super::patterns::{CHEQUE_DATE_LABEL, CHEQUE_DATE_SEGMENT, DATE_SEPARATOR};
use super::FieldParser;
use crate::error::ExtractionError;
use crate::models::paystub::ChequeDate;
use crate::paystub::Result;

/// Cheque date field parser.
///
/// Accepts `DD/MM/YYYY`, `DD-MM-YYYY`, `YYYY/MM/DD` and `YYYY-MM-DD`. The
/// order is decided by the length of the first token alone: anything other
/// than four characters is read as day-first and reversed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChequeDateParser;

impl ChequeDateParser {
    pub fn new() -> Self {
        Self
    }

    fn error(&self, line: &str) -> ExtractionError {
        ExtractionError::Parse {
            field: self.field().to_string(),
            value: line.to_string(),
        }
    }
}

impl FieldParser for ChequeDateParser {
    type Output = ChequeDate;

    fn field(&self) -> &'static str {
        "cheque date"
    }

    fn label(&self) -> &Regex {
        &CHEQUE_DATE_LABEL
    }

    fn parse(&self, line: &str) -> Result<ChequeDate> {
        let segments: Vec<&str> = line.split(':').collect();
        let label = segments
            .iter()
            .position(|s| CHEQUE_DATE_SEGMENT.is_match(s))
            .ok_or_else(|| self.error(line))?;

        // Value is the segment after the label, up to the first blank.
        let value = segments
            .get(label + 1)
            .and_then(|s| s.split_whitespace().next())
            .ok_or_else(|| self.error(line))?;

        let mut tokens: Vec<&str> = DATE_SEPARATOR.split(value).collect();
        if tokens.len() != 3 {
            return Err(self.error(line));
        }
        if tokens[0].chars().count() != 4 {
            tokens.reverse();
        }

        ChequeDate::new(tokens.concat()).ok_or_else(|| self.error(line))
    }
}
