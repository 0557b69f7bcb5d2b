//! Infrastructure adapters for hexgen.
//!
//! This crate implements the ports defined in `hexgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod config_store;
pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use config_store::YamlConfigStore;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{SimpleRenderer, TemplateSet, TemplateSetError};
