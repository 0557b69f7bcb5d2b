//! Structured config store adapters.
//!
//! One [`YamlConfigStore`] per registry kind; [`SectionLayout`] says where
//! in the document each kind keeps its entries. Every `add` runs under a
//! [`BackupGuard`](backup::BackupGuard) so a failure restores the file.

pub mod backup;
mod layout;
mod splice;
mod yaml;

pub use layout::{SectionLayout, SectionShape, entry_value};
pub use yaml::YamlConfigStore;
