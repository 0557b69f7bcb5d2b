//! Where each registry kind keeps its entries, and how an entry looks in
//! YAML.
//!
//! | Kind | Section | Shape |
//! |------|---------|-------|
//! | type mapping | `doctrine.orm.mappings` | mapping keyed by module |
//! | bus topology | `framework.messenger.buses` | mapping keyed by bus |
//! | dependency binding | `services` | mapping keyed by interface |
//! | route declaration | `routes` | list, entries identified by `name` |

use serde::Serialize;
use serde_yaml::Value;

use hexgen_core::domain::{ConfigEntry, EntryPayload, RegistryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    /// Entries are keys of a mapping.
    Mapping,
    /// Entries are list items carrying their key in `id_field`.
    List { id_field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub path: &'static [&'static str],
    pub shape: SectionShape,
}

impl SectionLayout {
    pub const fn for_kind(kind: RegistryKind) -> Self {
        match kind {
            RegistryKind::TypeMapping => Self {
                path: &["doctrine", "orm", "mappings"],
                shape: SectionShape::Mapping,
            },
            RegistryKind::BusTopology => Self {
                path: &["framework", "messenger", "buses"],
                shape: SectionShape::Mapping,
            },
            RegistryKind::DependencyBinding => Self {
                path: &["services"],
                shape: SectionShape::Mapping,
            },
            RegistryKind::RouteDeclaration => Self {
                path: &["routes"],
                shape: SectionShape::List { id_field: "name" },
            },
        }
    }

    /// e.g. `doctrine.orm.mappings`
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Serialize)]
struct MappingBody<'a> {
    #[serde(rename = "type")]
    backend: &'a str,
    is_bundle: bool,
    dir: &'a str,
    prefix: &'a str,
    alias: &'a str,
}

#[derive(Serialize)]
struct BusBody<'a> {
    middleware: &'a [String],
}

#[derive(Serialize)]
struct RouteBody<'a> {
    name: &'a str,
    resource: &'a str,
    #[serde(rename = "type")]
    loader: &'static str,
    namespace: &'a str,
}

/// The YAML value stored for `entry` (the value under its key, or the list
/// item for list sections).
pub fn entry_value(entry: &ConfigEntry) -> Result<Value, serde_yaml::Error> {
    match entry.payload() {
        EntryPayload::TypeMapping {
            backend,
            dir,
            prefix,
        } => serde_yaml::to_value(MappingBody {
            backend,
            is_bundle: false,
            dir,
            prefix,
            alias: entry.key(),
        }),
        // A bare bus name is valid and gets the default middleware stack.
        EntryPayload::BusTopology { middleware, .. } if middleware.is_empty() => Ok(Value::Null),
        EntryPayload::BusTopology { middleware, .. } => serde_yaml::to_value(BusBody { middleware }),
        EntryPayload::DependencyBinding { concrete, .. } => {
            Ok(Value::String(format!("@{concrete}")))
        }
        EntryPayload::RouteDeclaration {
            group,
            resource,
            namespace,
        } => serde_yaml::to_value(RouteBody {
            name: group,
            resource,
            loader: "attribute",
            namespace,
        }),
    }
}
