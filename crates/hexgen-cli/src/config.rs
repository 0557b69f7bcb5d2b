//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the [`ProjectLayout`]
//! and registry paths derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `HEXGEN_<SECTION>__<KEY>`, e.g.
//!    `HEXGEN_GENERATION__AUTO_REGISTER=true`
//! 3. Config file: `--config FILE`, else `./hexgen.toml`, else the user
//!    configuration directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use hexgen_core::domain::{ProjectLayout, RegistryKind};

pub const LOCAL_CONFIG_FILE: &str = "hexgen.toml";
const ENV_PREFIX: &str = "HEXGEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project: ProjectConfig,
    pub registries: RegistriesConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,

    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub root: PathBuf,
    pub source_dir: String,
    pub namespace: String,
    pub extension: String,
}

/// Project-relative registry files. An empty path leaves the registry
/// unconfigured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistriesConfig {
    pub type_mapping: String,
    pub bus_topology: String,
    pub dependency_binding: String,
    pub route_declaration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Register every generated artifact, as if `--register` were given.
    pub auto_register: bool,
    /// Directory of `<artifact>.tpl` overrides; relative paths start at the
    /// project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    pub mapping_backend: String,
    pub command_bus: String,
    pub query_bus: String,
    pub command_middleware: Vec<String>,
    pub query_middleware: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append logs to this file in addition to stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let layout = ProjectLayout::default();
        Self {
            root: PathBuf::from("."),
            source_dir: layout.source_dir,
            namespace: layout.namespace,
            extension: layout.extension,
        }
    }
}

impl Default for RegistriesConfig {
    fn default() -> Self {
        Self {
            type_mapping: "config/packages/doctrine.yaml".into(),
            bus_topology: "config/packages/messenger.yaml".into(),
            dependency_binding: "config/services.yaml".into(),
            route_declaration: "config/routes.yaml".into(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let layout = ProjectLayout::default();
        Self {
            auto_register: false,
            templates_dir: None,
            mapping_backend: layout.mapping_backend,
            command_bus: layout.command_bus,
            query_bus: layout.query_bus,
            command_middleware: layout.command_middleware,
            query_middleware: layout.query_middleware,
        }
    }
}

impl RegistriesConfig {
    pub fn path_for(&self, kind: RegistryKind) -> &str {
        match kind {
            RegistryKind::TypeMapping => &self.type_mapping,
            RegistryKind::BusTopology => &self.bus_topology,
            RegistryKind::DependencyBinding => &self.dependency_binding,
            RegistryKind::RouteDeclaration => &self.route_declaration,
        }
    }

    /// Configured registries, skipping empty paths.
    pub fn configured(&self) -> impl Iterator<Item = (RegistryKind, &str)> {
        RegistryKind::ALL
            .into_iter()
            .map(|kind| (kind, self.path_for(kind).trim()))
            .filter(|(_, path)| !path.is_empty())
    }
}

impl AppConfig {
    /// Load defaults, then the config file, then environment overrides.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let source = match config_file {
            Some(path) if !path.is_file() => {
                bail!("configuration file not found: {}", path.display())
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("invalid built-in configuration")?,
        );
        if let Some(path) = &source {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("generation.command_middleware")
                .with_list_parse_key("generation.query_middleware"),
        );

        let mut config: Self = builder
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .with_context(|| match &source {
                Some(path) => format!("cannot load configuration from {}", path.display()),
                None => "cannot load configuration from the environment".to_string(),
            })?;
        config.source = source;
        Ok(config)
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::global_config_path().filter(|p| p.is_file())
    }

    /// `config.toml` in the platform configuration directory.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "hexgen", "hexgen")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The file in use, or where `hexgen init` would write one.
    pub fn config_path(&self) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout {
            source_dir: self.project.source_dir.clone(),
            namespace: self.project.namespace.clone(),
            extension: self.project.extension.clone(),
            mapping_backend: self.generation.mapping_backend.clone(),
            command_bus: self.generation.command_bus.clone(),
            query_bus: self.generation.query_bus.clone(),
            command_middleware: self.generation.command_middleware.clone(),
            query_middleware: self.generation.query_middleware.clone(),
        }
    }

    /// Value at a dotted key, e.g. `generation.command_bus`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let root = serde_json::to_value(self).ok()?;
        key.split('.')
            .try_fold(&root, |value, segment| value.get(segment))
            .cloned()
    }
}
