//! Pay stub data models: the paginated text model, parsed fields, and batch results.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single line of extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
}

impl TextLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One page of extracted text, as ordered lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPage {
    pub lines: Vec<TextLine>,
}

impl TextPage {
    /// Build a page by splitting raw text on line breaks. Lines are trimmed and
    /// blank lines dropped.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(TextLine::new)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Ordered pages produced by a text extractor for one document.
pub type PageTextModel = Vec<TextPage>;

/// A cheque date normalized to `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChequeDate(String);

impl ChequeDate {
    /// Wrap an already-normalized value. Returns `None` unless it is exactly
    /// eight ASCII digits.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date, when the digits form a real date.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y%m%d").ok()
    }
}

impl fmt::Display for ChequeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields parsed from one pay stub. Absent fields were not found in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paystub {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_pay: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheque_date: Option<ChequeDate>,
}

/// Running net pay total across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetPayTotal(Decimal);

impl NetPayTotal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, amount: Decimal) {
        self.0 += amount;
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for NetPayTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// What happened when moving a decrypted document into the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// The document was moved to this path.
    Renamed(PathBuf),
    /// A file with the target name already existed; nothing was moved.
    SkippedExisting(PathBuf),
}

impl RenameOutcome {
    /// Path of the target name, whether or not the move happened.
    pub fn target(&self) -> &PathBuf {
        match self {
            Self::Renamed(p) | Self::SkippedExisting(p) => p,
        }
    }
}

/// Result of processing a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutcome {
    /// Source document.
    pub source: PathBuf,

    /// Parsed fields, when the document got that far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paystub: Option<Paystub>,

    /// Rename result, when a cheque date was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename: Option<RenameOutcome>,

    /// Non-fatal conditions, e.g. a missing field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Failure message, when the document failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate result of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Number of documents processed without error.
    pub processed_count: usize,

    /// Sum of net pay over successful documents.
    #[serde(rename = "totalAmount")]
    pub total: NetPayTotal,

    /// Per-document outcomes, in processing order.
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome. Successful documents count towards the total.
    pub fn record(&mut self, outcome: DocumentOutcome) {
        if outcome.is_success() {
            self.processed_count += 1;
            if let Some(amount) = outcome.paystub.as_ref().and_then(|p| p.net_pay) {
                self.total.add(amount);
            }
        }
        self.outcomes.push(outcome);
    }

    pub fn failed(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}
