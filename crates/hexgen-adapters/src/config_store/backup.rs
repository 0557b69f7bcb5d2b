//! Scoped backup of a config file for the duration of one mutation.
//!
//! A [`BackupGuard`] snapshots the file when taken. It must be either
//! committed (backup discarded) or rolled back (original restored). If it is
//! dropped while still armed, e.g. on an early return or a panic, it rolls
//! back on its own.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use hexgen_core::application::{ConfigError, ports::Filesystem};
use hexgen_core::domain::BackupRecord;

pub struct BackupGuard<'a> {
    fs: &'a dyn Filesystem,
    path: PathBuf,
    /// `None` when the file did not exist before the mutation.
    snapshot: Option<String>,
    record: Option<BackupRecord>,
    armed: bool,
}

impl<'a> BackupGuard<'a> {
    /// Copy `snapshot` (the current content of `path`) to a backup file.
    ///
    /// A missing original needs no backup file; rolling back removes
    /// whatever was created instead.
    pub fn take(
        fs: &'a dyn Filesystem,
        path: &Path,
        snapshot: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let record = match snapshot {
            Some(content) => {
                let nonce = Uuid::new_v4().simple().to_string();
                let record = BackupRecord::beside(path, Utc::now(), &nonce[..8]);
                fs.write_file(&record.backup_path, content)
                    .map_err(|e| ConfigError::Io {
                        path: record.backup_path.clone(),
                        reason: format!("cannot create backup: {e}"),
                    })?;
                debug!(backup = %record.backup_path.display(), "Backup created");
                Some(record)
            }
            None => None,
        };

        Ok(Self {
            fs,
            path: path.to_path_buf(),
            snapshot: snapshot.map(str::to_string),
            record,
            armed: true,
        })
    }

    pub fn record(&self) -> Option<&BackupRecord> {
        self.record.as_ref()
    }

    /// Keep the new content and discard the backup.
    pub fn commit(mut self) {
        self.armed = false;
        self.discard();
    }

    /// Restore the original content, then discard the backup.
    ///
    /// On failure the backup is kept and its path is part of the error.
    pub fn rollback(mut self) -> Result<(), ConfigError> {
        self.armed = false;
        self.restore()
    }

    fn restore(&self) -> Result<(), ConfigError> {
        let failed = |e: io::Error| ConfigError::RollbackFailed {
            path: self.path.clone(),
            backup: self
                .record
                .as_ref()
                .map(|r| r.backup_path.clone())
                .unwrap_or_default(),
            reason: e.to_string(),
        };

        match &self.snapshot {
            Some(original) => {
                let current = self.fs.read_to_string(&self.path).ok();
                if current.as_deref() == Some(original.as_str()) {
                    debug!(path = %self.path.display(), "Content unchanged, nothing to restore");
                } else {
                    self.fs.write_file(&self.path, original).map_err(failed)?;
                    warn!(path = %self.path.display(), "Restored from backup");
                }
            }
            None => {
                if self.fs.exists(&self.path) {
                    self.fs.remove_file(&self.path).map_err(failed)?;
                    warn!(path = %self.path.display(), "Removed partially created file");
                }
            }
        }

        self.discard();
        Ok(())
    }

    fn discard(&self) {
        let Some(record) = &self.record else {
            return;
        };
        match self.fs.remove_file(&record.backup_path) {
            Ok(()) => debug!(backup = %record.backup_path.display(), "Backup removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                backup = %record.backup_path.display(),
                error = %e,
                "Could not remove backup"
            ),
        }
    }
}

impl Drop for BackupGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.restore() {
                warn!(error = %e, "Rollback on drop failed");
            }
        }
    }
}
