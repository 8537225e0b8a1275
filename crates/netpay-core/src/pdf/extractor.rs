//! Page-by-page text extraction using lopdf, with pdf-extract as a fallback.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{Result, TextExtractor};
use crate::error::PdfError;
use crate::models::paystub::{PageTextModel, TextPage};

/// Page separator emitted by pdf-extract between pages.
const FORM_FEED: char = '\u{000c}';

/// Extracts per-page line text from decrypted PDFs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfTextExtractor;

impl LopdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_with_lopdf(&self, document: &Path) -> Result<Vec<String>> {
        let doc = Document::load(document).map_err(|e| PdfError::Parse(e.to_string()))?;

        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_num in pages.keys() {
            let text = doc.extract_text(&[*page_num]).unwrap_or_else(|e| {
                trace!("lopdf could not extract page {}: {}", page_num, e);
                String::new()
            });
            texts.push(text);
        }

        debug!("lopdf extracted {} pages from {}", texts.len(), document.display());
        Ok(texts)
    }

    fn extract_with_pdf_extract(&self, document: &Path) -> Result<Vec<String>> {
        let bytes = std::fs::read(document).map_err(|e| PdfError::Parse(e.to_string()))?;
        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        Ok(text.split(FORM_FEED).map(str::to_string).collect())
    }
}

impl TextExtractor for LopdfTextExtractor {
    fn extract_pages(&self, document: &Path) -> Result<PageTextModel> {
        let texts = self.extract_with_lopdf(document)?;

        let texts = if texts.iter().all(|t| t.trim().is_empty()) {
            debug!("No text from lopdf, falling back to pdf-extract for {}", document.display());
            self.extract_with_pdf_extract(document)?
        } else {
            texts
        };

        Ok(pages_from_texts(&texts))
    }
}

fn pages_from_texts(texts: &[String]) -> PageTextModel {
    texts.iter().map(|t| TextPage::from_text(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::paystub::TextLine;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pages_keep_order_and_split_lines() {
        let texts = vec![
            "ACME Payroll\nEmployee: J. Doe\n".to_string(),
            "Net Pay 1,000.00\nCheque Date: 2024-03-05".to_string(),
        ];

        let pages = pages_from_texts(&texts);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines[0], TextLine::new("Net Pay 1,000.00"));
        assert_eq!(pages[1].lines[1], TextLine::new("Cheque Date: 2024-03-05"));
    }

    #[test]
    fn test_empty_page_is_kept() {
        let pages = pages_from_texts(&["".to_string(), "Net Pay 1.00".to_string()]);
        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_extract_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-nope").unwrap();

        let result = LopdfTextExtractor::new().extract_pages(&path);
        assert!(result.is_err());
    }
}
