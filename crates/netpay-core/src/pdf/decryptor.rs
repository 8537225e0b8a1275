//! Password recovery over a fixed candidate list, plus the lopdf-backed decryptor.

use std::path::{Path, PathBuf};

use lopdf::Document;
use lopdf::encryption::DecryptionError;
use tracing::{debug, trace};

use super::{DocumentDecryptor, Result};
use crate::error::PdfError;
use crate::models::config::CandidatePasswords;

/// A decrypted copy of a source document, staged on disk.
///
/// Owned by the processing step for one document; consumed when the file is
/// moved into the destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedDocument {
    path: PathBuf,
    attempts: usize,
}

impl DecryptedDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of passwords tried, including the one that worked.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Tries candidate passwords in order until one unlocks the document.
pub struct PasswordRecoveryDecryptor<D> {
    decryptor: D,
}

impl<D: DocumentDecryptor> PasswordRecoveryDecryptor<D> {
    pub fn new(decryptor: D) -> Self {
        Self { decryptor }
    }

    /// Decrypt `source` into `destination`.
    ///
    /// Candidates are tried strictly in order, stopping at the first success.
    /// Only [`PdfError::WrongPassword`] advances to the next candidate; any
    /// other failure is returned immediately.
    pub fn decrypt(
        &self,
        source: &Path,
        destination: &Path,
        passwords: &CandidatePasswords,
    ) -> Result<DecryptedDocument> {
        for (index, password) in passwords.iter().enumerate() {
            trace!("Trying candidate password #{} for {}", index, source.display());

            match self.decryptor.decrypt(source, destination, password) {
                Ok(()) => {
                    debug!(
                        "Decrypted {} with candidate #{} -> {}",
                        source.display(),
                        index,
                        destination.display()
                    );
                    return Ok(DecryptedDocument {
                        path: destination.to_path_buf(),
                        attempts: index + 1,
                    });
                }
                Err(PdfError::WrongPassword) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(PdfError::PasswordsExhausted {
            path: source.to_path_buf(),
            attempts: passwords.len(),
        })
    }
}

/// Decrypts PDFs with lopdf and saves the unlocked copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfDecryptor;

impl LopdfDecryptor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecryptor for LopdfDecryptor {
    fn decrypt(&self, source: &Path, destination: &Path, password: &str) -> Result<()> {
        let mut doc = Document::load(source).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(password).map_err(decrypt_error)?;
        }

        doc.save(destination)
            .map_err(|e| PdfError::Save(format!("{}: {}", destination.display(), e)))?;
        Ok(())
    }
}

/// Only a rejected password moves on to the next candidate. Anything else
/// (unsupported crypt filter, damaged `/Encrypt` dictionary) fails the
/// document outright.
fn decrypt_error(e: lopdf::Error) -> PdfError {
    match e {
        lopdf::Error::Decryption(DecryptionError::IncorrectPassword) => {
            trace!("Candidate password rejected");
            PdfError::WrongPassword
        }
        other => PdfError::Parse(format!("cannot decrypt: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Accepts exactly one password and records every attempt.
    struct FakeDecryptor {
        correct: Option<&'static str>,
        attempts: RefCell<Vec<String>>,
    }

    impl FakeDecryptor {
        fn accepting(password: &'static str) -> Self {
            Self {
                correct: Some(password),
                attempts: RefCell::new(Vec::new()),
            }
        }

        fn rejecting_all() -> Self {
            Self {
                correct: None,
                attempts: RefCell::new(Vec::new()),
            }
        }
    }

    impl DocumentDecryptor for FakeDecryptor {
        fn decrypt(&self, _source: &Path, _destination: &Path, password: &str) -> Result<()> {
            self.attempts.borrow_mut().push(password.to_string());
            if self.correct == Some(password) {
                Ok(())
            } else {
                Err(PdfError::WrongPassword)
            }
        }
    }

    struct BrokenDecryptor;

    impl DocumentDecryptor for BrokenDecryptor {
        fn decrypt(&self, _source: &Path, _destination: &Path, _password: &str) -> Result<()> {
            Err(PdfError::Parse("not a PDF".to_string()))
        }
    }

    fn candidates(list: &[&str]) -> CandidatePasswords {
        list.iter().copied().collect()
    }

    #[test]
    fn test_stops_at_first_matching_candidate() {
        let fake = FakeDecryptor::accepting("c");
        let recovery = PasswordRecoveryDecryptor::new(&fake);

        let doc = recovery
            .decrypt(
                Path::new("in.pdf"),
                Path::new("/tmp/out.pdf"),
                &candidates(&["a", "b", "c", "d", "e"]),
            )
            .unwrap();

        assert_eq!(doc.attempts(), 3);
        assert_eq!(doc.path(), Path::new("/tmp/out.pdf"));
        assert_eq!(*fake.attempts.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_first_candidate_uses_one_attempt() {
        let fake = FakeDecryptor::accepting("a");
        let recovery = PasswordRecoveryDecryptor::new(&fake);

        let doc = recovery
            .decrypt(Path::new("in.pdf"), Path::new("out.pdf"), &candidates(&["a", "b"]))
            .unwrap();

        assert_eq!(doc.attempts(), 1);
        assert_eq!(fake.attempts.borrow().len(), 1);
    }

    #[test]
    fn test_exhausted_candidates_is_typed_failure() {
        let fake = FakeDecryptor::rejecting_all();
        let recovery = PasswordRecoveryDecryptor::new(&fake);

        let err = recovery
            .decrypt(Path::new("in.pdf"), Path::new("out.pdf"), &candidates(&["a", "b", "c"]))
            .unwrap_err();

        match err {
            PdfError::PasswordsExhausted { path, attempts } => {
                assert_eq!(path, PathBuf::from("in.pdf"));
                assert_eq!(attempts, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fake.attempts.borrow().len(), 3);
    }

    #[test]
    fn test_empty_candidate_list_is_exhausted() {
        let fake = FakeDecryptor::accepting("a");
        let recovery = PasswordRecoveryDecryptor::new(&fake);

        let err = recovery
            .decrypt(
                Path::new("in.pdf"),
                Path::new("out.pdf"),
                &CandidatePasswords::from_iter(Vec::<String>::new()),
            )
            .unwrap_err();

        assert!(matches!(err, PdfError::PasswordsExhausted { attempts: 0, .. }));
    }

    #[test]
    fn test_non_password_failure_is_not_retried() {
        let recovery = PasswordRecoveryDecryptor::new(BrokenDecryptor);

        let err = recovery
            .decrypt(Path::new("in.pdf"), Path::new("out.pdf"), &candidates(&["a", "b"]))
            .unwrap_err();

        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_incorrect_password_advances_loop() {
        let err = decrypt_error(lopdf::Error::Decryption(DecryptionError::IncorrectPassword));
        assert!(matches!(err, PdfError::WrongPassword));
    }

    #[test]
    fn test_other_decryption_failures_are_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "unsupported crypt filter");
        let err = decrypt_error(lopdf::Error::from(io));
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_lopdf_decryptor_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("garbage.pdf");
        std::fs::write(&source, b"definitely not a pdf").unwrap();

        let err = LopdfDecryptor::new()
            .decrypt(&source, &dir.path().join("out.pdf"), "secret")
            .unwrap_err();

        assert!(matches!(err, PdfError::Parse(_)));
        assert!(!dir.path().join("out.pdf").exists());
    }
}
