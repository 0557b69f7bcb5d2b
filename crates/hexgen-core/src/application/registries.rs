//! The set of config stores a service works with.
//!
//! Built once at startup from configuration and handed to the services,
//! so there is no process-wide lookup table.

use std::fmt;
use std::sync::Arc;

use crate::application::ports::ConfigStore;
use crate::domain::{RegistryKind, RelativePath};

/// A store bound to the file it manages.
#[derive(Clone)]
pub struct RegistryBinding {
    pub kind: RegistryKind,
    pub path: RelativePath,
    pub store: Arc<dyn ConfigStore>,
}

impl fmt::Debug for RegistryBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBinding")
            .field("kind", &self.kind)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registries {
    bindings: Vec<RegistryBinding>,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `store` to `path`. A later binding for the same kind replaces
    /// the earlier one.
    pub fn bind(mut self, path: RelativePath, store: Arc<dyn ConfigStore>) -> Self {
        let kind = store.kind();
        self.bindings.retain(|b| b.kind != kind);
        self.bindings.push(RegistryBinding { kind, path, store });
        self.bindings.sort_by_key(|b| b.kind);
        self
    }

    pub fn get(&self, kind: RegistryKind) -> Option<&RegistryBinding> {
        self.bindings.iter().find(|b| b.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryBinding> {
        self.bindings.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
