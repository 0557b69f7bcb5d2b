//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hexgen-adapters` crate provides implementations.

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::application::ConfigError;
use crate::domain::{ArtifactPlan, ConfigEntry, GeneratedFiles, RegistryKind};
use crate::error::HexgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hexgen_adapters::filesystem::LocalFilesystem` (production)
/// - `hexgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Relative paths are resolved against the adapter's project root.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// What an `add` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    /// The key was registered already; the file was not touched.
    AlreadyPresent,
}

/// Port for one structured configuration registry.
///
/// Implemented by:
/// - `hexgen_adapters::config_store::YamlConfigStore`
///
/// `add` is idempotent and leaves the file unchanged on any failure.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore: Send + Sync {
    /// Registry kind this store accepts.
    fn kind(&self) -> RegistryKind;

    /// Read-only check. A missing file holds no entries.
    fn exists(&self, file: &Path, key: &str) -> Result<bool, ConfigError>;

    fn add(&self, file: &Path, entry: &ConfigEntry) -> Result<AddOutcome, ConfigError>;
}

/// Port for turning an artifact plan into file contents.
///
/// Implemented by:
/// - `hexgen_adapters::renderer::SimpleRenderer` (placeholder substitution)
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactRenderer: Send + Sync {
    fn render(&self, plan: &ArtifactPlan) -> HexgenResult<GeneratedFiles>;
}
