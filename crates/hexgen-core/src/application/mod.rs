//! Application layer for hexgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, DiagnosticService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Registries**: the config stores injected into the services
//! - **Errors**: Application and config-store error types
//!
//! The application layer coordinates the domain layer but contains no
//! parsing or classification logic itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod registries;
pub mod services;

pub use services::{
    CheckStatus, DiagnosticCheck, DiagnosticReport, DiagnosticService, FileOutcome, FileStatus,
    GenerationReport, GenerationService, RegistrationOutcome, RegistrationStatus,
};

pub use ports::{AddOutcome, ArtifactRenderer, ConfigStore, Filesystem};

pub use error::{ApplicationError, ConfigError};
pub use registries::{Registries, RegistryBinding};
