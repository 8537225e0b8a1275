//! Deterministic, collision-safe renaming of decrypted pay stubs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::RenameError;
use crate::models::paystub::{ChequeDate, RenameOutcome};

/// Canonical file name for a stub with the given cheque date.
pub fn paystub_file_name(date: &ChequeDate) -> String {
    format!("paystub-{}.pdf", date)
}

/// Moves decrypted documents into a destination directory under their
/// canonical name. Existing files are never overwritten: first write wins.
pub struct RenamePlanner {
    destination: PathBuf,
}

impl RenamePlanner {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Target path for a cheque date.
    pub fn target_path(&self, date: &ChequeDate) -> PathBuf {
        self.destination.join(paystub_file_name(date))
    }

    /// Move `origin` to `paystub-<date>.pdf` in the destination directory.
    ///
    /// If the target already exists the move is skipped and `origin` stays
    /// where it is.
    pub fn rename(&self, origin: &Path, date: &ChequeDate) -> Result<RenameOutcome, RenameError> {
        if !origin.exists() {
            return Err(RenameError::OriginNotFound(origin.to_path_buf()));
        }
        if !self.destination.exists() {
            return Err(RenameError::DestinationNotFound(self.destination.clone()));
        }
        if !self.destination.is_dir() {
            return Err(RenameError::DestinationNotADirectory(self.destination.clone()));
        }

        let target = self.target_path(date);
        if target.exists() {
            warn!(
                "{} already exists, leaving {} in place",
                target.display(),
                origin.display()
            );
            return Ok(RenameOutcome::SkippedExisting(target));
        }

        match move_file(origin, &target) {
            Ok(()) => {
                debug!("Moved {} -> {}", origin.display(), target.display());
                Ok(RenameOutcome::Renamed(target))
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                warn!("{} appeared while moving {}", target.display(), origin.display());
                Ok(RenameOutcome::SkippedExisting(target))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Move without ever replacing `to`. Fails with `AlreadyExists` if it is
/// taken. Links first; filesystems without hard links (or a move across
/// devices) get an exclusive-create copy instead.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::hard_link(from, to) {
        Ok(()) => fs::remove_file(from),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(e),
        Err(e) => {
            debug!("hard link failed ({}), copying {}", e, from.display());
            let mut source = fs::File::open(from)?;
            let mut target = fs::OpenOptions::new().write(true).create_new(true).open(to)?;
            io::copy(&mut source, &mut target)?;
            fs::remove_file(from)
        }
    }
}
