//! Error types for the netpay-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the netpay library.
#[derive(Error, Debug)]
pub enum NetpayError {
    /// Configuration is missing or could not be parsed.
    #[error("unable to read config or missing: {0}")]
    ConfigUnreadable(String),

    /// The source directory contains no PDF documents.
    #[error("No PDF files found in {}", .0.display())]
    NoFilesFound(PathBuf),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Rename error.
    #[error("rename error: {0}")]
    Rename(#[from] RenameError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The supplied password did not unlock the document.
    #[error("wrong password")]
    WrongPassword,

    /// Every candidate password was tried without success.
    #[error("no candidate password unlocked {} ({attempts} attempts)", .path.display())]
    PasswordsExhausted { path: PathBuf, attempts: usize },

    /// Failed to write the decrypted document.
    #[error("failed to save decrypted PDF: {0}")]
    Save(String),
}

/// Errors related to pay stub field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The label for a field was not present in the extracted text.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// Failed to parse a value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Errors related to moving a decrypted document into place.
#[derive(Error, Debug)]
pub enum RenameError {
    /// The file to be moved does not exist.
    #[error("file {} not found", .0.display())]
    OriginNotFound(PathBuf),

    /// The destination directory does not exist.
    #[error("directory {} not found", .0.display())]
    DestinationNotFound(PathBuf),

    /// The destination exists but is not a directory.
    #[error("{} is not a directory", .0.display())]
    DestinationNotADirectory(PathBuf),

    /// The move itself failed.
    #[error("failed to move file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the netpay library.
pub type Result<T> = std::result::Result<T, NetpayError>;
