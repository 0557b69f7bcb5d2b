//! YAML-backed config store, one instance per registry kind.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde_yaml::{Mapping, Value};
use tracing::{debug, info, instrument, warn};

use hexgen_core::application::{
    ConfigError,
    ports::{AddOutcome, ConfigStore, Filesystem},
};
use hexgen_core::domain::{ConfigEntry, RegistryKind};

use super::backup::BackupGuard;
use super::layout::{SectionLayout, SectionShape, entry_value};
use super::splice::append_entry;

/// Reads and appends registrations in a YAML file.
///
/// New entries are spliced into the existing text, so existing keys,
/// comments and formatting stay as they were. Inline sections with content
/// fall back to re-serialising the document.
pub struct YamlConfigStore {
    kind: RegistryKind,
    layout: SectionLayout,
    fs: Arc<dyn Filesystem>,
}

impl YamlConfigStore {
    pub fn new(kind: RegistryKind, fs: Arc<dyn Filesystem>) -> Self {
        Self {
            kind,
            layout: SectionLayout::for_kind(kind),
            fs,
        }
    }

    pub fn layout(&self) -> SectionLayout {
        self.layout
    }

    /// `None` when the file does not exist.
    fn load(&self, file: &Path) -> Result<Option<String>, ConfigError> {
        match self.fs.read_to_string(file) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(file, e)),
        }
    }

    /// Empty files and a bare `~` count as an empty document.
    fn parse(&self, file: &Path, text: &str) -> Result<Value, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Value::Mapping(Mapping::new()));
        }
        let value: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            path: file.to_path_buf(),
            reason: e.to_string(),
        })?;
        match value {
            Value::Null => Ok(Value::Mapping(Mapping::new())),
            Value::Mapping(_) => Ok(value),
            _ => Err(self.shape_error(file, 0, "mapping")),
        }
    }

    fn contains(&self, file: &Path, root: &Value, key: &str) -> Result<bool, ConfigError> {
        let mut current = root;
        for (depth, segment) in self.layout.path.iter().enumerate() {
            let map = current
                .as_mapping()
                .ok_or_else(|| self.shape_error(file, depth, "mapping"))?;
            match map.get(*segment) {
                None | Some(Value::Null) => return Ok(false),
                Some(next) => current = next,
            }
        }

        let depth = self.layout.path.len();
        match self.layout.shape {
            SectionShape::Mapping => current
                .as_mapping()
                .map(|m| m.contains_key(key))
                .ok_or_else(|| self.shape_error(file, depth, "mapping")),
            SectionShape::List { id_field } => current
                .as_sequence()
                .map(|items| {
                    items
                        .iter()
                        .any(|item| item.get(id_field).and_then(Value::as_str) == Some(key))
                })
                .ok_or_else(|| self.shape_error(file, depth, "list")),
        }
    }

    /// Insert `value` under `key`, creating missing sections.
    fn insert(
        &self,
        file: &Path,
        root: &mut Value,
        key: &str,
        value: Value,
    ) -> Result<(), ConfigError> {
        let path = self.layout.path;
        let mut current = root;
        for (depth, segment) in path.iter().enumerate() {
            let is_leaf = depth + 1 == path.len();
            let Value::Mapping(map) = current else {
                return Err(self.shape_error(file, depth, "mapping"));
            };

            if map.get(*segment).is_none_or(Value::is_null) {
                let fresh = match self.layout.shape {
                    SectionShape::List { .. } if is_leaf => Value::Sequence(Vec::new()),
                    _ => Value::Mapping(Mapping::new()),
                };
                debug!(section = %path[..=depth].join("."), "Creating section");
                map.insert(Value::String((*segment).to_string()), fresh);
            }
            current = map
                .get_mut(*segment)
                .ok_or_else(|| self.shape_error(file, depth, "mapping"))?;
        }

        let depth = path.len();
        match self.layout.shape {
            SectionShape::Mapping => {
                let Value::Mapping(section) = current else {
                    return Err(self.shape_error(file, depth, "mapping"));
                };
                section.insert(Value::String(key.to_string()), value);
            }
            SectionShape::List { .. } => {
                let Value::Sequence(items) = current else {
                    return Err(self.shape_error(file, depth, "list"));
                };
                items.push(value);
            }
        }
        Ok(())
    }

    /// Steps after the backup: build, serialise and write the new document.
    ///
    /// The entry is spliced into the existing text so comments and formatting
    /// survive. The splice must parse back to the same document as a plain
    /// insert; otherwise the whole document is re-serialised.
    fn apply(
        &self,
        file: &Path,
        original: &str,
        root: Value,
        entry: &ConfigEntry,
    ) -> Result<(), ConfigError> {
        let serialization = |e: serde_yaml::Error| ConfigError::Serialization {
            path: file.to_path_buf(),
            reason: e.to_string(),
        };
        let value = entry_value(entry).map_err(serialization)?;
        let mut expected = root;
        self.insert(file, &mut expected, entry.key(), value.clone())?;

        let text = match append_entry(original, &self.layout, entry.key(), &value)
            .map_err(serialization)?
        {
            Some(spliced) if parses_to(&spliced, &expected) => spliced,
            _ => {
                debug!(
                    section = %self.layout.dotted(),
                    "Section cannot be extended in place, rewriting"
                );
                serde_yaml::to_string(&expected).map_err(serialization)?
            }
        };

        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.fs.exists(parent) {
                self.fs.create_dir_all(parent).map_err(|e| io_error(parent, e))?;
            }
        }
        self.fs.write_file(file, &text).map_err(|e| io_error(file, e))
    }

    /// `depth` segments of the section path, e.g. `doctrine.orm`.
    fn shape_error(&self, file: &Path, depth: usize, expected: &'static str) -> ConfigError {
        let section = match depth {
            0 => "<document root>".to_string(),
            n => self.layout.path[..n.min(self.layout.path.len())].join("."),
        };
        ConfigError::UnexpectedShape {
            path: file.to_path_buf(),
            section,
            expected,
        }
    }
}

fn parses_to(text: &str, expected: &Value) -> bool {
    serde_yaml::from_str::<Value>(text).is_ok_and(|v| &v == expected)
}

fn io_error(path: &Path, e: io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

impl ConfigStore for YamlConfigStore {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    #[instrument(skip_all, fields(kind = %self.kind, key = key, file = %file.display()))]
    fn exists(&self, file: &Path, key: &str) -> Result<bool, ConfigError> {
        let Some(text) = self.load(file)? else {
            return Ok(false);
        };
        let root = self.parse(file, &text)?;
        self.contains(file, &root, key)
    }

    #[instrument(skip_all, fields(kind = %self.kind, key = entry.key(), file = %file.display()))]
    fn add(&self, file: &Path, entry: &ConfigEntry) -> Result<AddOutcome, ConfigError> {
        if entry.kind() != self.kind {
            return Err(ConfigError::KindMismatch {
                path: file.to_path_buf(),
                expected: self.kind,
                found: entry.kind(),
            });
        }

        let original = self.load(file)?;
        let root = self.parse(file, original.as_deref().unwrap_or(""))?;
        if self.contains(file, &root, entry.key())? {
            debug!("Already registered");
            return Ok(AddOutcome::AlreadyPresent);
        }

        let guard = BackupGuard::take(self.fs.as_ref(), file, original.as_deref())?;
        match self.apply(file, original.as_deref().unwrap_or(""), root, entry) {
            Ok(()) => {
                guard.commit();
                info!("Entry registered");
                Ok(AddOutcome::Added)
            }
            Err(e) => {
                warn!(error = %e, "Registration failed, rolling back");
                guard.rollback()?;
                Err(e)
            }
        }
    }
}
