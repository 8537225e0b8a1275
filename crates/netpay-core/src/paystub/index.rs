//! Label queries over the paginated text model.

use regex::Regex;
use tracing::trace;

use crate::models::paystub::PageTextModel;

/// Read-only index over one document's extracted pages.
pub struct PageTextIndex<'a> {
    pages: &'a PageTextModel,
}

impl<'a> PageTextIndex<'a> {
    pub fn new(pages: &'a PageTextModel) -> Self {
        Self { pages }
    }

    /// Lines matching `pattern` on the first page that has any match.
    ///
    /// Later pages are never consulted once a page matches, even if they
    /// carry other labels: fields are expected to share one page. Embedded
    /// NUL characters are stripped before matching. Returns an empty vector
    /// when no page matches.
    pub fn find_labeled_lines(&self, pattern: &Regex) -> Vec<String> {
        for (index, page) in self.pages.iter().enumerate() {
            let matches: Vec<String> = page
                .lines
                .iter()
                .map(|line| line.text.replace('\0', ""))
                .filter(|text| pattern.is_match(text))
                .collect();

            if !matches.is_empty() {
                trace!("{} labeled lines on page {}", matches.len(), index + 1);
                return matches;
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::paystub::{TextLine, TextPage};
    use crate::paystub::rules::FIELD_LABELS;
    use pretty_assertions::assert_eq;

    fn page(lines: &[&str]) -> TextPage {
        TextPage {
            lines: lines.iter().map(|l| TextLine::new(*l)).collect(),
        }
    }

    #[test]
    fn test_returns_matches_from_first_matching_page() {
        let pages = vec![
            page(&["ACME Payroll", "Employee 42"]),
            page(&["Net Pay 1,000.00", "Deductions", "Cheque Date: 2024-03-05"]),
            page(&["Net Pay 9,999.99"]),
        ];

        let lines = PageTextIndex::new(&pages).find_labeled_lines(&FIELD_LABELS);
        assert_eq!(lines, vec!["Net Pay 1,000.00", "Cheque Date: 2024-03-05"]);
    }

    #[test]
    fn test_strips_nul_characters() {
        let pages = vec![page(&["N\0et Pay 12.00\0"])];

        let lines = PageTextIndex::new(&pages).find_labeled_lines(&FIELD_LABELS);
        assert_eq!(lines, vec!["Net Pay 12.00"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let pages = vec![page(&["nothing here"]), TextPage::default()];
        assert!(PageTextIndex::new(&pages).find_labeled_lines(&FIELD_LABELS).is_empty());
    }

    #[test]
    fn test_later_page_ignored_once_a_page_matches() {
        // Date label on page 1, net pay only on page 2: net pay is not found.
        let pages = vec![
            page(&["Cheque Date: 05/03/2024"]),
            page(&["Net Pay 1,234.56"]),
        ];

        let lines = PageTextIndex::new(&pages).find_labeled_lines(&FIELD_LABELS);
        assert_eq!(lines, vec!["Cheque Date: 05/03/2024"]);
        assert!(!lines.iter().any(|l| l.starts_with("Net Pay")));
    }
}
