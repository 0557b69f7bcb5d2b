//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hexgen-adapters` implement these.
//!
//! ## Driven (Output) Ports
//!
//! - `Filesystem`: project-relative file operations
//! - `ConfigStore`: existence checks and idempotent insertion for one
//!   registry kind
//! - `ArtifactRenderer`: plan → file contents

pub mod output;

pub use output::{AddOutcome, ArtifactRenderer, ConfigStore, Filesystem};

#[cfg(test)]
pub use output::{MockArtifactRenderer, MockConfigStore, MockFilesystem};
