//! Core library for batch pay stub processing.
//!
//! This crate provides:
//! - Password recovery for encrypted PDFs over a fixed candidate list
//! - Page-by-page text extraction
//! - Net pay and cheque date location and parsing
//! - Collision-safe renaming to `paystub-YYYYMMDD.pdf`
//! - A batch orchestrator that totals net pay across documents

pub mod batch;
pub mod error;
pub mod models;
pub mod paystub;
pub mod pdf;
pub mod rename;

pub use batch::{BatchProcessor, FailurePolicy};
pub use error::{NetpayError, Result};
pub use models::config::{BatchConfig, CandidatePasswords};
pub use models::paystub::{BatchReport, ChequeDate, DocumentOutcome, NetPayTotal, Paystub, RenameOutcome};
pub use paystub::{PageTextIndex, ParsedFields, PaystubParser};
pub use pdf::{DocumentDecryptor, LopdfDecryptor, LopdfTextExtractor, PasswordRecoveryDecryptor, TextExtractor};
pub use rename::RenamePlanner;
