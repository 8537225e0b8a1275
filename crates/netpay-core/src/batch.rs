//! Batch orchestration: decrypt, extract, parse, rename, and total each stub.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{NetpayError, Result};
use crate::models::config::{BatchConfig, CandidatePasswords};
use crate::models::paystub::{BatchReport, DocumentOutcome, Paystub, RenameOutcome};
use crate::paystub::{ParsedFields, PaystubParser};
use crate::pdf::{DocumentDecryptor, PasswordRecoveryDecryptor, TextExtractor};
use crate::rename::RenamePlanner;

/// Extension of documents picked up from the source directory.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// What to do when a single document fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole batch on the first failure.
    Strict,
    /// Record the failure and carry on with the next document.
    #[default]
    ContinueOnError,
}

/// A document that made it through the pipeline.
#[derive(Debug)]
struct ProcessedDocument {
    paystub: Paystub,
    rename: Option<RenameOutcome>,
    warnings: Vec<String>,
}

/// Runs the decrypt-and-extract pipeline over every document in a directory.
pub struct BatchProcessor<D, E> {
    recovery: PasswordRecoveryDecryptor<D>,
    extractor: E,
    parser: PaystubParser,
    passwords: CandidatePasswords,
    origin_dir: PathBuf,
    temp_dir: PathBuf,
    renamer: RenamePlanner,
    policy: FailurePolicy,
}

impl<D: DocumentDecryptor, E: TextExtractor> BatchProcessor<D, E> {
    /// Create a processor. `temp_dir` is the resolved staging directory
    /// (see [`BatchConfig::temp_dir`]).
    pub fn new(config: &BatchConfig, temp_dir: PathBuf, decryptor: D, extractor: E) -> Self {
        Self {
            recovery: PasswordRecoveryDecryptor::new(decryptor),
            extractor,
            parser: PaystubParser::new(),
            passwords: config.candidate_passwords(),
            origin_dir: config.origin_path.clone(),
            temp_dir,
            renamer: RenamePlanner::new(config.decrypted_path.clone()),
            policy: FailurePolicy::default(),
        }
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Treat a missing net pay or cheque date as a document failure.
    pub fn with_required_fields(mut self, require: bool) -> Self {
        self.parser = PaystubParser::new().with_required_fields(require);
        self
    }

    /// PDF documents in the source directory, in directory listing order.
    pub fn list_documents(&self) -> Result<Vec<PathBuf>> {
        let mut documents = Vec::new();
        for entry in fs::read_dir(&self.origin_dir)? {
            let path = entry?.path();
            let is_document = path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
            if is_document {
                documents.push(path);
            }
        }

        if documents.is_empty() {
            return Err(NetpayError::NoFilesFound(self.origin_dir.clone()));
        }
        Ok(documents)
    }

    /// Process every document and return the aggregate report.
    pub fn run(&self) -> Result<BatchReport> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_document` after each document.
    pub fn run_with<F>(&self, on_document: F) -> Result<BatchReport>
    where
        F: FnMut(&DocumentOutcome),
    {
        let documents = self.list_documents()?;
        self.run_documents(documents, on_document)
    }

    /// Process an already listed set of documents, in the given order.
    pub fn run_documents<F>(
        &self,
        documents: Vec<PathBuf>,
        mut on_document: F,
    ) -> Result<BatchReport>
    where
        F: FnMut(&DocumentOutcome),
    {
        if documents.is_empty() {
            return Err(NetpayError::NoFilesFound(self.origin_dir.clone()));
        }
        fs::create_dir_all(&self.temp_dir)?;
        info!(
            "Processing {} documents from {}",
            documents.len(),
            self.origin_dir.display()
        );

        let mut report = BatchReport::new();

        for source in documents {
            let start = Instant::now();
            let result = self.process_document(&source);
            let processing_time_ms = start.elapsed().as_millis() as u64;

            let outcome = match result {
                Ok(processed) => {
                    info!("Processed {}", source.display());
                    DocumentOutcome {
                        source,
                        paystub: Some(processed.paystub),
                        rename: processed.rename,
                        warnings: processed.warnings,
                        error: None,
                        processing_time_ms,
                    }
                }
                Err(e) if self.policy == FailurePolicy::Strict => return Err(e),
                Err(e) => {
                    warn!("Failed to process {}: {}", source.display(), e);
                    DocumentOutcome {
                        source,
                        paystub: None,
                        rename: None,
                        warnings: Vec::new(),
                        error: Some(e.to_string()),
                        processing_time_ms,
                    }
                }
            };

            on_document(&outcome);
            report.record(outcome);
        }

        debug!("Batch total: {}", report.total);
        Ok(report)
    }

    /// Decrypt, extract and parse a single document without renaming it.
    /// The staged copy is removed afterwards.
    pub fn inspect(&self, source: &Path) -> Result<ParsedFields> {
        fs::create_dir_all(&self.temp_dir)?;
        let staged = self.staging_path(source)?;
        let document = self.recovery.decrypt(source, &staged, &self.passwords)?;

        let parsed = self
            .extractor
            .extract_pages(document.path())
            .map_err(NetpayError::from)
            .and_then(|pages| Ok(self.parser.parse(&pages)?));

        if let Err(e) = fs::remove_file(document.path()) {
            warn!("Could not remove {}: {}", document.path().display(), e);
        }
        parsed
    }

    fn process_document(&self, source: &Path) -> Result<ProcessedDocument> {
        let staged = self.staging_path(source)?;
        let document = self.recovery.decrypt(source, &staged, &self.passwords)?;
        debug!(
            "Unlocked {} after {} attempt(s)",
            source.display(),
            document.attempts()
        );

        let pages = self.extractor.extract_pages(document.path())?;
        let parsed = self.parser.parse(&pages)?;

        let mut warnings = Vec::new();
        for missing in &parsed.missing {
            warn!("{}: {}", source.display(), missing);
            warnings.push(missing.to_string());
        }

        let rename = match &parsed.paystub.cheque_date {
            Some(date) => {
                let outcome = self.renamer.rename(document.path(), date)?;
                if let RenameOutcome::SkippedExisting(target) = &outcome {
                    warnings.push(format!("{} already exists, not renamed", target.display()));
                }
                Some(outcome)
            }
            None => None,
        };

        Ok(ProcessedDocument {
            paystub: parsed.paystub,
            rename,
            warnings,
        })
    }

    /// Staging path for a source document: same file name, in the temp dir.
    fn staging_path(&self, source: &Path) -> Result<PathBuf> {
        let name = source.file_name().ok_or_else(|| {
            NetpayError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has no file name", source.display()),
            ))
        })?;
        Ok(self.temp_dir.join(name))
    }
}
