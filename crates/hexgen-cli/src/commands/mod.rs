//! One module per subcommand, plus the adapter wiring they share.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use hexgen_adapters::{LocalFilesystem, SimpleRenderer, TemplateSet, YamlConfigStore};
use hexgen_core::{
    application::{DiagnosticService, GenerationService, Registries, ports::Filesystem},
    domain::{ProjectLayout, RelativePath},
    error::HexgenError,
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod classify;
pub mod completions;
pub mod config;
pub mod doctor;
pub mod generate;
pub mod init;
pub mod props;

/// The target project with its adapters bound.
///
/// Every path the services see is relative to `root`.
pub struct Project {
    root: PathBuf,
    filesystem: Arc<dyn Filesystem>,
    registries: Registries,
    layout: ProjectLayout,
    templates_dir: Option<PathBuf>,
}

impl Project {
    pub fn open(global: &GlobalArgs, config: &AppConfig) -> CliResult<Self> {
        let root = global
            .project_root
            .clone()
            .unwrap_or_else(|| config.project.root.clone());
        if !root.is_dir() {
            return Err(CliError::InvalidInput {
                message: format!("project root '{}' is not a directory", root.display()),
            });
        }

        let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::rooted(&root));
        let mut registries = Registries::new();
        for (kind, path) in config.registries.configured() {
            let path = RelativePath::try_new(path).map_err(HexgenError::from)?;
            debug!(%kind, %path, "Registry bound");
            registries = registries.bind(
                path,
                Arc::new(YamlConfigStore::new(kind, Arc::clone(&filesystem))),
            );
        }

        let templates_dir = config
            .generation
            .templates_dir
            .as_ref()
            .map(|dir| root.join(dir));

        Ok(Self {
            root,
            filesystem,
            registries,
            layout: config.layout(),
            templates_dir,
        })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn generation_service(self) -> CliResult<GenerationService> {
        let templates = match &self.templates_dir {
            Some(dir) => TemplateSet::with_overrides(dir)?,
            None => TemplateSet::builtin(),
        };
        Ok(GenerationService::new(
            Box::new(SimpleRenderer::with_templates(templates)),
            self.filesystem,
            self.registries,
            self.layout,
        ))
    }

    pub fn diagnostic_service(self) -> DiagnosticService {
        DiagnosticService::new(self.filesystem, self.registries, self.layout)
    }
}
