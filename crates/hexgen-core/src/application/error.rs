//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the config
//! stores, not in parsing. Grammar and naming errors live in
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::RegistryKind;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A file to generate is already on disk and `force` was not given.
    #[error("Refusing to overwrite existing file {path}")]
    ArtifactExists { path: PathBuf },

    /// Registration was requested for a registry with no configured file.
    #[error("No {kind} registry is configured")]
    RegistryNotConfigured { kind: RegistryKind },

    /// Rendering failed (missing template, bad override file).
    #[error("Rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ArtifactExists { path } => vec![
                format!("{} already exists", path.display()),
                "Use --force to overwrite it".into(),
                "Or pick another name".into(),
            ],
            Self::RegistryNotConfigured { kind } => vec![
                format!("Set [registries] {} in hexgen.toml", kind.as_str().replace('-', "_")),
                "Or run without --register".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "Check the files in your templates directory".into(),
                "Remove an override to fall back to the built-in template".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ArtifactExists { .. } => ErrorCategory::Validation,
            Self::RegistryNotConfigured { .. } => ErrorCategory::Configuration,
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}

/// Failure while reading or mutating a structured config file.
///
/// Every mutation failure is reported after the file has been restored to
/// its previous content. `RollbackFailed` is the exception: it means the
/// restore itself failed and the backup was left on disk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cannot parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Unexpected structure in {path}: '{section}' should be a {expected}")]
    UnexpectedShape {
        path: PathBuf,
        section: String,
        expected: &'static str,
    },

    #[error("Cannot serialize entry for {path}: {reason}")]
    Serialization { path: PathBuf, reason: String },

    #[error("I/O error on {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("{path} is a {expected} registry but received a {found} entry")]
    KindMismatch {
        path: PathBuf,
        expected: RegistryKind,
        found: RegistryKind,
    },

    #[error("Rollback of {path} failed ({reason}); original content kept in {backup}")]
    RollbackFailed {
        path: PathBuf,
        backup: PathBuf,
        reason: String,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Parse { path, .. }
            | Self::UnexpectedShape { path, .. }
            | Self::Serialization { path, .. }
            | Self::Io { path, .. }
            | Self::KindMismatch { path, .. }
            | Self::RollbackFailed { path, .. } => path,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Parse { path, .. } | Self::UnexpectedShape { path, .. } => vec![
                format!("Fix the syntax of {} and run again", path.display()),
                "The file was left untouched".into(),
            ],
            Self::Io { path, .. } => vec![
                format!("Check permissions on {}", path.display()),
                "The file was left untouched".into(),
            ],
            Self::RollbackFailed { backup, path, .. } => vec![
                format!("Copy {} back to {} by hand", backup.display(), path.display()),
            ],
            Self::KindMismatch { .. } => {
                vec!["Check the [registries] section of hexgen.toml".into()]
            }
            Self::Serialization { .. } => vec!["This is likely a bug, please report it".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse { .. } | Self::UnexpectedShape { .. } | Self::KindMismatch { .. } => {
                ErrorCategory::Configuration
            }
            Self::Io { .. } | Self::Serialization { .. } | Self::RollbackFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
