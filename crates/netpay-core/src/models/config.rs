//! Configuration for a pay stub batch.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{NetpayError, Result};

/// Separator between candidate passwords in the `passwords` setting.
pub const PASSWORD_SEPARATOR: char = '|';

/// Batch configuration, read from `config.json`.
///
/// Every key is required. Keys are camelCase on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchConfig {
    /// Directory containing the encrypted source documents.
    pub origin_path: PathBuf,

    /// Directory that receives renamed, decrypted documents.
    pub decrypted_path: PathBuf,

    /// Staging folder name, relative to the home directory.
    pub temp_destination_path: PathBuf,

    /// `|`-delimited candidate passwords, tried in order.
    pub passwords: String,
}

impl BatchConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NetpayError::ConfigUnreadable(format!("{}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| NetpayError::ConfigUnreadable(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| NetpayError::ConfigUnreadable(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| NetpayError::ConfigUnreadable(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Split the password setting into the ordered candidate list.
    pub fn candidate_passwords(&self) -> CandidatePasswords {
        CandidatePasswords::parse(&self.passwords)
    }

    /// Staging directory for decrypted documents under `home`.
    pub fn temp_dir(&self, home: &Path) -> PathBuf {
        home.join(&self.temp_destination_path)
    }

    /// Copy of the configuration safe to print.
    pub fn masked(&self) -> Self {
        let count = self.candidate_passwords().len();
        let separator = PASSWORD_SEPARATOR.to_string();
        let masked = vec!["****"; count].join(separator.as_str());
        Self {
            passwords: masked,
            ..self.clone()
        }
    }

    /// Template written by `config init`.
    pub fn template() -> Self {
        Self {
            origin_path: PathBuf::from("paystubs"),
            decrypted_path: PathBuf::from("paystubs/decrypted"),
            temp_destination_path: PathBuf::from(".netpay-tmp"),
            passwords: "first-guess|second-guess".to_string(),
        }
    }
}

/// Ordered candidate passwords. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePasswords(Vec<String>);

impl CandidatePasswords {
    /// Parse a `|`-delimited list. Empty entries are kept: an empty
    /// password is a valid candidate.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(PASSWORD_SEPARATOR).map(str::to_string).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CandidatePasswords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "originPath": "/data/stubs",
        "decryptedPath": "/data/out",
        "tempDestinationPath": "tmp-stubs",
        "passwords": "alpha|beta||gamma"
    }"#;

    #[test]
    fn test_parse_camel_case_config() {
        let config = BatchConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.origin_path, PathBuf::from("/data/stubs"));
        assert_eq!(config.decrypted_path, PathBuf::from("/data/out"));
        assert_eq!(config.temp_destination_path, PathBuf::from("tmp-stubs"));
    }

    #[test]
    fn test_candidate_passwords_keep_order_and_empty_entries() {
        let config = BatchConfig::from_json(SAMPLE).unwrap();
        let candidates = config.candidate_passwords();
        let passwords: Vec<&str> = candidates.iter().collect();
        assert_eq!(passwords, vec!["alpha", "beta", "", "gamma"]);
    }

    #[test]
    fn test_missing_key_is_config_unreadable() {
        let err = BatchConfig::from_json(r#"{"originPath": "/a"}"#).unwrap_err();
        assert!(matches!(err, NetpayError::ConfigUnreadable(_)));
    }

    #[test]
    fn test_missing_file_is_config_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = BatchConfig::from_file(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, NetpayError::ConfigUnreadable(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        BatchConfig::template().save(&path).unwrap();

        let loaded = BatchConfig::from_file(&path).unwrap();
        assert_eq!(loaded.passwords, "first-guess|second-guess");
    }

    #[test]
    fn test_temp_dir_is_under_home() {
        let config = BatchConfig::from_json(SAMPLE).unwrap();
        assert_eq!(
            config.temp_dir(Path::new("/home/user")),
            PathBuf::from("/home/user/tmp-stubs")
        );
    }

    #[test]
    fn test_masked_hides_passwords() {
        let config = BatchConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.masked().passwords, "****|****|****|****");
    }
}
