//! PDF processing module: decryption and positional text extraction.

mod decryptor;
mod extractor;

pub use decryptor::{LopdfDecryptor, PasswordRecoveryDecryptor, DecryptedDocument};
pub use extractor::LopdfTextExtractor;

use std::path::Path;

use crate::error::PdfError;
use crate::models::paystub::PageTextModel;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Something that can unlock an encrypted PDF with a single password.
pub trait DocumentDecryptor {
    /// Decrypt `source` with `password`, writing the unlocked document to
    /// `destination`. A wrong password must yield [`PdfError::WrongPassword`].
    fn decrypt(&self, source: &Path, destination: &Path, password: &str) -> Result<()>;
}

/// Something that turns a decrypted PDF into pages of text lines.
pub trait TextExtractor {
    /// Extract the ordered pages of `document`.
    fn extract_pages(&self, document: &Path) -> Result<PageTextModel>;
}

impl<T: DocumentDecryptor + ?Sized> DocumentDecryptor for &T {
    fn decrypt(&self, source: &Path, destination: &Path, password: &str) -> Result<()> {
        (**self).decrypt(source, destination, password)
    }
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract_pages(&self, document: &Path) -> Result<PageTextModel> {
        (**self).extract_pages(document)
    }
}
