//! Unified error handling for hexgen core.
//!
//! This module provides a unified error type that wraps parse, domain,
//! config-store and application errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, ConfigError};
use crate::domain::{DomainError, PropertyParseError};

pub use crate::domain::ErrorCategory;

/// Root error type for hexgen core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HexgenError {
    /// Malformed property specification.
    #[error("Invalid property specification: {0}")]
    Parse(#[from] PropertyParseError),

    /// Invalid names, entries or paths.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A config store could not read or update its file.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Orchestration failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl HexgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Parse(e) => e.suggestions(),
            Self::Domain(e) => e.suggestions(),
            Self::Config(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `hexgen config list` to inspect the effective settings".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in hexgen".into(),
                "Please report it with the output of `hexgen -vv`".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::Validation,
            Self::Domain(e) => e.category(),
            Self::Config(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Convenient result type alias.
pub type HexgenResult<T> = Result<T, HexgenError>;
