//! Pay stub parser tying field location to the individual field rules.

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::paystub::{PageTextModel, Paystub};

use super::index::PageTextIndex;
use super::rules::{ChequeDateParser, FieldParser, NetPayParser, FIELD_LABELS};
use super::Result;

/// Fields parsed from one document, plus any labels that were not found.
#[derive(Debug)]
pub struct ParsedFields {
    pub paystub: Paystub,
    /// One [`ExtractionError::FieldNotFound`] per absent field.
    pub missing: Vec<ExtractionError>,
}

/// Locates and parses the net pay and cheque date fields.
pub struct PaystubParser {
    net_pay: NetPayParser,
    cheque_date: ChequeDateParser,
    /// Treat an absent field as an error instead of reporting it.
    require_fields: bool,
}

impl PaystubParser {
    pub fn new() -> Self {
        Self {
            net_pay: NetPayParser::new(),
            cheque_date: ChequeDateParser::new(),
            require_fields: false,
        }
    }

    /// Fail with [`ExtractionError::FieldNotFound`] when a label is absent.
    pub fn with_required_fields(mut self, require: bool) -> Self {
        self.require_fields = require;
        self
    }

    /// Parse both fields from the first page carrying either label.
    pub fn parse(&self, pages: &PageTextModel) -> Result<ParsedFields> {
        let lines = PageTextIndex::new(pages).find_labeled_lines(&FIELD_LABELS);
        debug!("Found {} labeled lines", lines.len());

        let net_pay = self.net_pay.parse_optional(self.net_pay.find_line(&lines))?;
        let cheque_date = self
            .cheque_date
            .parse_optional(self.cheque_date.find_line(&lines))?;

        let mut missing = Vec::new();
        if net_pay.is_none() {
            missing.push(ExtractionError::FieldNotFound(self.net_pay.field().to_string()));
        }
        if cheque_date.is_none() {
            missing.push(ExtractionError::FieldNotFound(self.cheque_date.field().to_string()));
        }

        if self.require_fields && !missing.is_empty() {
            return Err(missing.remove(0));
        }

        Ok(ParsedFields {
            paystub: Paystub {
                net_pay,
                cheque_date,
            },
            missing,
        })
    }
}

impl Default for PaystubParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::paystub::TextPage;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_parse_both_fields() {
        let pages = vec![
            TextPage::from_text("ACME Payroll Services\nEmployee: J. Doe"),
            TextPage::from_text(
                "Gross Pay 3,000.00\nNet Pay 2,345.678\nPeriod 6   Cheque Date: 05/03/2024",
            ),
        ];

        let parsed = PaystubParser::new().parse(&pages).unwrap();

        assert_eq!(parsed.paystub.net_pay, Some(Decimal::from_str("2345.67").unwrap()));
        assert_eq!(parsed.paystub.cheque_date.unwrap().as_str(), "20240305");
        assert!(parsed.missing.is_empty());
    }

    #[test]
    fn test_missing_field_is_reported() {
        let pages = vec![TextPage::from_text("Cheque Date: 2024-03-05")];

        let parsed = PaystubParser::new().parse(&pages).unwrap();

        assert_eq!(parsed.paystub.net_pay, None);
        assert_eq!(parsed.missing.len(), 1);
        assert!(matches!(&parsed.missing[0], ExtractionError::FieldNotFound(f) if f == "net pay"));
    }

    #[test]
    fn test_net_pay_on_later_page_is_not_found() {
        let pages = vec![
            TextPage::from_text("Cheque Date: 05/03/2024"),
            TextPage::from_text("Net Pay 1,234.56"),
        ];

        let parsed = PaystubParser::new().parse(&pages).unwrap();

        assert_eq!(parsed.paystub.net_pay, None);
        assert_eq!(parsed.paystub.cheque_date.unwrap().as_str(), "20240305");
    }

    #[test]
    fn test_required_fields() {
        let pages = vec![TextPage::from_text("Net Pay 10.00")];

        let err = PaystubParser::new()
            .with_required_fields(true)
            .parse(&pages)
            .unwrap_err();

        assert!(matches!(err, ExtractionError::FieldNotFound(f) if f == "cheque date"));
    }

    #[test]
    fn test_no_labels_at_all() {
        let pages = vec![TextPage::from_text("blank stub")];

        let parsed = PaystubParser::new().parse(&pages).unwrap();

        assert_eq!(parsed.paystub, Paystub::default());
        assert_eq!(parsed.missing.len(), 2);
    }
}
