//! Built-in templates plus optional per-project overrides.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use hexgen_core::domain::ArtifactKind;

use crate::builtin_templates;

const TEMPLATE_EXTENSION: &str = "tpl";

#[derive(Debug, Error)]
pub enum TemplateSetError {
    #[error("Templates directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Cannot scan templates directory {path}: {reason}")]
    Scan { path: PathBuf, reason: String },

    #[error("Cannot read template {path}: {reason}")]
    Read { path: PathBuf, reason: String },
}

/// Template text per artifact kind.
///
/// A file named `<kind>.tpl` (e.g. `command-handler.tpl`) anywhere below the
/// overrides directory replaces the built-in template for that kind. Other
/// files are ignored with a warning.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    overrides: HashMap<ArtifactKind, String>,
}

impl TemplateSet {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_overrides(dir: &Path) -> Result<Self, TemplateSetError> {
        if !dir.is_dir() {
            return Err(TemplateSetError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut overrides = HashMap::new();
        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| TemplateSetError::Scan {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }

            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let Some(kind) = ArtifactKind::from_template_name(stem) else {
                warn!(path = %path.display(), "Ignoring template with unknown name");
                continue;
            };

            let content = fs::read_to_string(path).map_err(|e| TemplateSetError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            debug!(%kind, path = %path.display(), "Template override loaded");
            overrides.insert(kind, content);
        }

        info!(count = overrides.len(), dir = %dir.display(), "Template overrides loaded");
        Ok(Self { overrides })
    }

    /// Override a single template in code.
    pub fn with_template(mut self, kind: ArtifactKind, content: impl Into<String>) -> Self {
        self.overrides.insert(kind, content.into());
        self
    }

    pub fn get(&self, kind: ArtifactKind) -> &str {
        self.overrides
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| builtin_templates::template(kind))
    }

    pub fn is_overridden(&self, kind: ArtifactKind) -> bool {
        self.overrides.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn falls_back_to_builtin() {
        let set = TemplateSet::builtin();
        for kind in ArtifactKind::ALL {
            assert!(!set.is_overridden(kind));
            assert_eq!(set.get(kind), builtin_templates::template(kind));
        }
    }

    #[test]
    fn discovers_overrides_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("handlers")).unwrap();
        fs::write(dir.path().join("entity.tpl"), "entity {{NAME}}").unwrap();
        fs::write(dir.path().join("handlers/command-handler.tpl"), "handler").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("widget.tpl"), "unknown").unwrap();

        let set = TemplateSet::with_overrides(dir.path()).unwrap();
        assert_eq!(set.get(ArtifactKind::Entity), "entity {{NAME}}");
        assert_eq!(set.get(ArtifactKind::CommandHandler), "handler");
        assert!(!set.is_overridden(ArtifactKind::Query));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = TemplateSet::with_overrides(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, TemplateSetError::DirectoryNotFound(_)));
    }
}
