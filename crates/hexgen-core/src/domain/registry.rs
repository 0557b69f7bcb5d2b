//! Registry kinds, configuration entries and backup records.
//!
//! A [`ConfigEntry`] is one registration to insert into a structured
//! configuration file. Its payload is validated when the entry is built, so
//! config stores only deal with well-formed entries and never need to know
//! per-kind rules.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── RegistryKind ─────────────────────────────────────────────────────────────

/// The four configuration families generated artifacts are registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryKind {
    /// Entity-to-storage mapping declarations.
    TypeMapping,
    /// Message bus definitions and their middleware.
    BusTopology,
    /// Interface-to-implementation service bindings.
    DependencyBinding,
    /// Route groups loaded from a controller directory.
    RouteDeclaration,
}

impl RegistryKind {
    pub const ALL: [Self; 4] = [
        Self::TypeMapping,
        Self::BusTopology,
        Self::DependencyBinding,
        Self::RouteDeclaration,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeMapping => "type-mapping",
            Self::BusTopology => "bus-topology",
            Self::DependencyBinding => "dependency-binding",
            Self::RouteDeclaration => "route-declaration",
        }
    }

    /// Human label used in diagnostic output.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TypeMapping => "mapping",
            Self::BusTopology => "bus",
            Self::DependencyBinding => "binding",
            Self::RouteDeclaration => "route",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "type-mapping" | "mapping" | "mappings" => Ok(Self::TypeMapping),
            "bus-topology" | "bus" | "buses" | "messenger" => Ok(Self::BusTopology),
            "dependency-binding" | "binding" | "bindings" | "services" => {
                Ok(Self::DependencyBinding)
            }
            "route-declaration" | "route" | "routes" | "routing" => Ok(Self::RouteDeclaration),
            other => Err(DomainError::UnknownRegistryKind {
                value: other.to_string(),
            }),
        }
    }
}

// ── EntryPayload ─────────────────────────────────────────────────────────────

/// Kind-specific body of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EntryPayload {
    TypeMapping {
        /// Storage backend identifier, e.g. `xml` or `attribute`.
        backend: String,
        dir: String,
        prefix: String,
    },
    BusTopology {
        bus: String,
        /// Applied in order.
        middleware: Vec<String>,
    },
    DependencyBinding {
        interface: String,
        concrete: String,
    },
    RouteDeclaration {
        group: String,
        resource: String,
        namespace: String,
    },
}

impl EntryPayload {
    pub const fn kind(&self) -> RegistryKind {
        match self {
            Self::TypeMapping { .. } => RegistryKind::TypeMapping,
            Self::BusTopology { .. } => RegistryKind::BusTopology,
            Self::DependencyBinding { .. } => RegistryKind::DependencyBinding,
            Self::RouteDeclaration { .. } => RegistryKind::RouteDeclaration,
        }
    }
}

// ── ConfigEntry ──────────────────────────────────────────────────────────────

/// One logical registration, keyed for existence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    key: String,
    payload: EntryPayload,
}

impl ConfigEntry {
    /// Mapping declaration keyed by module name.
    pub fn type_mapping(
        key: impl Into<String>,
        backend: impl Into<String>,
        dir: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let kind = RegistryKind::TypeMapping;
        let key = required(kind, "key", key.into(), "")?;
        let payload = EntryPayload::TypeMapping {
            backend: required(kind, "backend", backend.into(), &key)?,
            dir: required(kind, "dir", dir.into(), &key)?,
            prefix: required(kind, "prefix", prefix.into(), &key)?,
        };
        Ok(Self { key, payload })
    }

    /// Bus definition keyed by the bus name.
    pub fn bus_topology(
        bus: impl Into<String>,
        middleware: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, DomainError> {
        let kind = RegistryKind::BusTopology;
        let bus = required(kind, "bus", bus.into(), "")?;
        let middleware = middleware
            .into_iter()
            .map(|m| required(kind, "middleware", m.into(), &bus))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            key: bus.clone(),
            payload: EntryPayload::BusTopology { bus, middleware },
        })
    }

    /// Service binding keyed by the abstract name.
    pub fn dependency_binding(
        interface: impl Into<String>,
        concrete: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let kind = RegistryKind::DependencyBinding;
        let interface = required(kind, "interface", interface.into(), "")?;
        let concrete = required(kind, "concrete", concrete.into(), &interface)?;
        if interface == concrete {
            return Err(DomainError::InvalidEntry {
                kind: kind.to_string(),
                key: interface,
                reason: "an interface cannot be bound to itself".into(),
            });
        }
        Ok(Self {
            key: interface.clone(),
            payload: EntryPayload::DependencyBinding {
                interface,
                concrete,
            },
        })
    }

    /// Route group keyed by its name.
    pub fn route_declaration(
        group: impl Into<String>,
        resource: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let kind = RegistryKind::RouteDeclaration;
        let group = required(kind, "group", group.into(), "")?;
        let payload = EntryPayload::RouteDeclaration {
            resource: required(kind, "resource", resource.into(), &group)?,
            namespace: required(kind, "namespace", namespace.into(), &group)?,
            group: group.clone(),
        };
        Ok(Self {
            key: group,
            payload,
        })
    }

    pub const fn kind(&self) -> RegistryKind {
        self.payload.kind()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn payload(&self) -> &EntryPayload {
        &self.payload
    }
}

impl fmt::Display for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind().label(), self.key)
    }
}

fn required(
    kind: RegistryKind,
    field: &'static str,
    value: String,
    key: &str,
) -> Result<String, DomainError> {
    let value = value.trim().to_string();
    let reason = if value.is_empty() {
        format!("{field} must not be empty")
    } else if value.chars().any(char::is_control) {
        format!("{field} must not contain control characters")
    } else {
        return Ok(value);
    };

    Err(DomainError::InvalidEntry {
        kind: kind.to_string(),
        key: if key.is_empty() { value } else { key.to_string() },
        reason,
    })
}

// ── BackupRecord ─────────────────────────────────────────────────────────────

/// A snapshot of a config file taken before it is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub original_path: PathBuf,
    pub backup_path: PathBuf,
    pub timestamp: DateTime<Utc>,
}

impl BackupRecord {
    /// Backup beside the original: `<file>.<YYYYmmddTHHMMSS>-<nonce>.bak`.
    pub fn beside(original: &Path, timestamp: DateTime<Utc>, nonce: &str) -> Self {
        let mut name = original
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}-{nonce}.bak", timestamp.format("%Y%m%dT%H%M%S")));

        Self {
            original_path: original.to_path_buf(),
            backup_path: original.with_file_name(name),
            timestamp,
        }
    }
}
