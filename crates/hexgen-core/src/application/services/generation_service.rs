//! Generation Service - main application orchestrator.
//!
//! This service coordinates one generation step:
//! 1. Validate names, parse properties / classify the operation
//! 2. Render the artifact plan
//! 3. Write the files
//! 4. Register the new artifact in the configured registries
//!
//! Each file write and each registry mutation is independently safe, but a
//! failure partway through leaves earlier files in place.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, Registries,
        ports::{AddOutcome, ArtifactRenderer, Filesystem},
    },
    domain::{
        ArtifactPlan, ConfigEntry, DomainError, GeneratedFiles, GenerationRequest, GeneratorKind,
        PatternClassification, ProjectLayout, PropertyDescriptor, RegistrationPlanner,
        RegistryKind, RelativePath, classify_with_context, parse_properties, validate_name,
    },
    error::HexgenResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Created,
    Overwritten,
    /// Dry run: would have been written.
    Planned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: RelativePath,
    pub status: FileStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Added,
    AlreadyPresent,
    /// Dry run: would have been added.
    Planned,
}

impl From<AddOutcome> for RegistrationStatus {
    fn from(outcome: AddOutcome) -> Self {
        match outcome {
            AddOutcome::Added => Self::Added,
            AddOutcome::AlreadyPresent => Self::AlreadyPresent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    pub kind: RegistryKind,
    pub key: String,
    pub path: RelativePath,
    pub status: RegistrationStatus,
}

/// What a generation step did.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub generator: GeneratorKind,
    pub module: String,
    pub name: String,
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
    pub properties: Vec<PropertyDescriptor>,
    pub classification: Option<PatternClassification>,
    pub registrations: Vec<RegistrationOutcome>,
}

/// Main generation service.
///
/// All adapters are injected at construction; registries that are not bound
/// simply cannot be registered into.
pub struct GenerationService {
    renderer: Box<dyn ArtifactRenderer>,
    filesystem: Arc<dyn Filesystem>,
    registries: Registries,
    layout: ProjectLayout,
}

impl GenerationService {
    pub fn new(
        renderer: Box<dyn ArtifactRenderer>,
        filesystem: Arc<dyn Filesystem>,
        registries: Registries,
        layout: ProjectLayout,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            registries,
            layout,
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Entity, repository interface and repository implementation.
    #[instrument(skip_all, fields(module = %request.module, entity = %request.name))]
    pub fn generate_entity(&self, request: &GenerationRequest) -> HexgenResult<GenerationReport> {
        let (module, name) = self.names(GeneratorKind::Entity, request)?;
        let properties = parse_properties(request.properties.as_deref().unwrap_or(""))?;
        debug!(count = properties.len(), "Properties parsed");

        let plan = ArtifactPlan::new(GeneratorKind::Entity, &module, &name, &self.layout)?
            .with_properties(properties);
        let entries = self.planner().for_entity(&module, &name)?;
        self.execute(plan, entries, request)
    }

    /// Command message and its handler.
    #[instrument(skip_all, fields(module = %request.module, command = %request.name))]
    pub fn generate_command(&self, request: &GenerationRequest) -> HexgenResult<GenerationReport> {
        let (module, name) = self.names(GeneratorKind::Command, request)?;
        let plan = self.classified_plan(GeneratorKind::Command, &module, &name, request)?;
        let entries = self.planner().for_command()?;
        self.execute(plan, entries, request)
    }

    /// Query message and its handler.
    #[instrument(skip_all, fields(module = %request.module, query = %request.name))]
    pub fn generate_query(&self, request: &GenerationRequest) -> HexgenResult<GenerationReport> {
        let (module, name) = self.names(GeneratorKind::Query, request)?;
        let plan = self.classified_plan(GeneratorKind::Query, &module, &name, request)?;
        let entries = self.planner().for_query()?;
        self.execute(plan, entries, request)
    }

    /// HTTP controller and the module's route group.
    #[instrument(skip_all, fields(module = %request.module, controller = %request.name))]
    pub fn generate_controller(
        &self,
        request: &GenerationRequest,
    ) -> HexgenResult<GenerationReport> {
        let (module, name) = self.names(GeneratorKind::Controller, request)?;
        let plan = ArtifactPlan::new(GeneratorKind::Controller, &module, &name, &self.layout)?;
        let entries = self.planner().for_controller(&module)?;
        self.execute(plan, entries, request)
    }

    pub fn generate(
        &self,
        generator: GeneratorKind,
        request: &GenerationRequest,
    ) -> HexgenResult<GenerationReport> {
        match generator {
            GeneratorKind::Entity => self.generate_entity(request),
            GeneratorKind::Command => self.generate_command(request),
            GeneratorKind::Query => self.generate_query(request),
            GeneratorKind::Controller => self.generate_controller(request),
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn planner(&self) -> RegistrationPlanner<'_> {
        RegistrationPlanner::new(&self.layout)
    }

    fn names(
        &self,
        generator: GeneratorKind,
        request: &GenerationRequest,
    ) -> Result<(String, String), DomainError> {
        let module = validate_name("module", &request.module)?;
        let name = validate_name(generator.as_str(), &request.name)?;
        Ok((module, name))
    }

    /// The module name serves as context entity for single-entity relations.
    fn classified_plan(
        &self,
        generator: GeneratorKind,
        module: &str,
        name: &str,
        request: &GenerationRequest,
    ) -> HexgenResult<ArtifactPlan> {
        let classification = classify_with_context(name, request.entities.as_deref(), Some(module));
        debug!(
            intent = %classification.intent(),
            entities = ?classification.inferred_entities(),
            "Operation classified"
        );
        Ok(ArtifactPlan::new(generator, module, name, &self.layout)?
            .with_classification(classification))
    }

    fn execute(
        &self,
        plan: ArtifactPlan,
        entries: Vec<ConfigEntry>,
        request: &GenerationRequest,
    ) -> HexgenResult<GenerationReport> {
        let options = request.options;

        let files = self.renderer.render(&plan)?;
        files.validate()?;
        info!(files = files.len(), "Artifacts rendered");

        let files = self.write_files(files, options.force, options.dry_run)?;

        let registrations = if options.register {
            self.register(&entries, options.dry_run)?
        } else {
            Vec::new()
        };

        info!(generator = %plan.generator, "Generation completed");
        Ok(GenerationReport {
            generator: plan.generator,
            module: plan.module,
            name: plan.name,
            dry_run: options.dry_run,
            files,
            properties: plan.properties,
            classification: plan.classification,
            registrations,
        })
    }

    /// Refuse before writing anything if any target exists without `force`.
    fn write_files(
        &self,
        files: GeneratedFiles,
        force: bool,
        dry_run: bool,
    ) -> HexgenResult<Vec<FileOutcome>> {
        if !force {
            if let Some(existing) = files.iter().find(|f| self.filesystem.exists(f.path.as_path())) {
                return Err(ApplicationError::ArtifactExists {
                    path: existing.path.clone().into_path_buf(),
                }
                .into());
            }
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let path = file.path.as_path();
            let status = if dry_run {
                FileStatus::Planned
            } else {
                let existed = self.filesystem.exists(path);
                self.write_one(path, &file.content)?;
                debug!(path = %path.display(), "File written");
                if existed {
                    FileStatus::Overwritten
                } else {
                    FileStatus::Created
                }
            };
            outcomes.push(FileOutcome {
                path: file.path,
                status,
            });
        }
        Ok(outcomes)
    }

    fn write_one(&self, path: &Path, content: &str) -> Result<(), ApplicationError> {
        let fs_error = |e: std::io::Error| ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent).map_err(fs_error)?;
        }
        self.filesystem.write_file(path, content).map_err(fs_error)
    }

    fn register(
        &self,
        entries: &[ConfigEntry],
        dry_run: bool,
    ) -> HexgenResult<Vec<RegistrationOutcome>> {
        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in entries {
            let binding = self.registries.get(entry.kind()).ok_or(
                ApplicationError::RegistryNotConfigured { kind: entry.kind() },
            )?;
            let file = binding.path.as_path();

            let status = if dry_run {
                if binding.store.exists(file, entry.key())? {
                    RegistrationStatus::AlreadyPresent
                } else {
                    RegistrationStatus::Planned
                }
            } else {
                binding.store.add(file, entry)?.into()
            };

            info!(kind = %entry.kind(), key = entry.key(), ?status, "Registration processed");
            outcomes.push(RegistrationOutcome {
                kind: entry.kind(),
                key: entry.key().to_string(),
                path: binding.path.clone(),
                status,
            });
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ConfigError,
        ports::{MockArtifactRenderer, MockConfigStore, MockFilesystem},
    };
    use crate::domain::{GenerationOptions, Intent};
    use crate::error::HexgenError;

    /// Renders one file per planned artifact, content = artifact kind.
    fn echo_renderer() -> Box<dyn ArtifactRenderer> {
        let mut renderer = MockArtifactRenderer::new();
        renderer.expect_render().returning(|plan| {
            let mut files = GeneratedFiles::new();
            for artifact in &plan.artifacts {
                files.add(
                    artifact.kind,
                    artifact.path.clone(),
                    artifact.kind.to_string(),
                );
            }
            Ok(files)
        });
        Box::new(renderer)
    }

    fn empty_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs
    }

    fn path(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    fn service(fs: MockFilesystem, registries: Registries) -> GenerationService {
        GenerationService::new(
            echo_renderer(),
            Arc::new(fs),
            registries,
            ProjectLayout::default(),
        )
    }

    #[test]
    fn entity_generation_writes_all_artifacts() {
        let mut fs = empty_fs();
        fs.expect_write_file().times(3).returning(|_, _| Ok(()));

        let request = GenerationRequest::new("billing", "Invoice")
            .with_properties("number:string(3,20):unique,total:decimal(0,)");
        let report = service(fs, Registries::new())
            .generate_entity(&request)
            .unwrap();

        assert_eq!(report.module, "Billing");
        assert_eq!(report.files.len(), 3);
        assert!(report.files.iter().all(|f| f.status == FileStatus::Created));
        assert_eq!(report.properties.len(), 2);
        assert!(report.registrations.is_empty());
    }

    #[test]
    fn parse_error_aborts_before_rendering() {
        let mut renderer = MockArtifactRenderer::new();
        renderer.expect_render().never();
        let service = GenerationService::new(
            Box::new(renderer),
            Arc::new(MockFilesystem::new()),
            Registries::new(),
            ProjectLayout::default(),
        );

        let request = GenerationRequest::new("Billing", "Invoice").with_properties("age:int(10,1)");
        let err = service.generate_entity(&request).unwrap_err();
        assert!(matches!(err, HexgenError::Parse(_)));
    }

    #[test]
    fn invalid_module_name_is_rejected() {
        let err = service(MockFilesystem::new(), Registries::new())
            .generate_controller(&GenerationRequest::new("my module", "Home"))
            .unwrap_err();
        assert!(matches!(err, HexgenError::Domain(DomainError::InvalidName { .. })));
    }

    #[test]
    fn existing_file_without_force_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().never();

        let err = service(fs, Registries::new())
            .generate_controller(&GenerationRequest::new("Blog", "Post"))
            .unwrap_err();
        assert!(matches!(
            err,
            HexgenError::Application(ApplicationError::ArtifactExists { .. })
        ));
    }

    #[test]
    fn force_overwrites() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let request = GenerationRequest::new("Blog", "Post").with_options(GenerationOptions {
            force: true,
            ..GenerationOptions::default()
        });
        let report = service(fs, Registries::new())
            .generate_controller(&request)
            .unwrap();
        assert_eq!(report.files[0].status, FileStatus::Overwritten);
    }

    #[test]
    fn command_is_classified_with_module_context() {
        let mut fs = empty_fs();
        fs.expect_write_file().times(2).returning(|_, _| Ok(()));

        let report = service(fs, Registries::new())
            .generate_command(&GenerationRequest::new("Utilisateur", "AttribuerCadeaux"))
            .unwrap();

        let classification = report.classification.unwrap();
        assert_eq!(classification.intent(), Intent::AttachRelation);
        assert_eq!(classification.inferred_entities(), ["Cadeaux", "Utilisateur"]);
        assert_eq!(
            report.files[1].path.to_string(),
            "src/Utilisateur/Application/Command/AttribuerCadeaux/AttribuerCadeauxHandler.php"
        );
    }

    #[test]
    fn register_adds_planned_entries() {
        let mut fs = empty_fs();
        fs.expect_write_file().returning(|_, _| Ok(()));

        let mut bus = MockConfigStore::new();
        bus.expect_kind().return_const(RegistryKind::BusTopology);
        bus.expect_add()
            .withf(|file, entry| {
                file == Path::new("config/packages/messenger.yaml") && entry.key() == "query.bus"
            })
            .times(1)
            .returning(|_, _| Ok(AddOutcome::Added));

        let registries = Registries::new().bind(path("config/packages/messenger.yaml"), Arc::new(bus));
        let request = GenerationRequest::new("Billing", "ListInvoices").with_options(GenerationOptions {
            register: true,
            ..GenerationOptions::default()
        });

        let report = service(fs, registries).generate_query(&request).unwrap();
        assert_eq!(report.registrations.len(), 1);
        assert_eq!(report.registrations[0].status, RegistrationStatus::Added);
    }

    #[test]
    fn register_without_binding_fails() {
        let mut fs = empty_fs();
        fs.expect_write_file().returning(|_, _| Ok(()));

        let request = GenerationRequest::new("Blog", "Post").with_options(GenerationOptions {
            register: true,
            ..GenerationOptions::default()
        });
        let err = service(fs, Registries::new())
            .generate_controller(&request)
            .unwrap_err();
        assert_eq!(
            err,
            HexgenError::Application(ApplicationError::RegistryNotConfigured {
                kind: RegistryKind::RouteDeclaration
            })
        );
    }

    #[test]
    fn config_error_propagates_after_files_written() {
        let mut fs = empty_fs();
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let mut routes = MockConfigStore::new();
        routes.expect_kind().return_const(RegistryKind::RouteDeclaration);
        routes.expect_add().returning(|file, _| {
            Err(ConfigError::Parse {
                path: file.to_path_buf(),
                reason: "did not find expected key".into(),
            })
        });

        let registries = Registries::new().bind(path("config/routes.yaml"), Arc::new(routes));
        let request = GenerationRequest::new("Blog", "Post").with_options(GenerationOptions {
            register: true,
            ..GenerationOptions::default()
        });

        let err = service(fs, registries).generate_controller(&request).unwrap_err();
        assert!(matches!(err, HexgenError::Config(ConfigError::Parse { .. })));
    }

    #[test]
    fn dry_run_touches_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let mut mappings = MockConfigStore::new();
        mappings.expect_kind().return_const(RegistryKind::TypeMapping);
        mappings.expect_exists().returning(|_, _| Ok(true));
        mappings.expect_add().never();

        let mut services = MockConfigStore::new();
        services.expect_kind().return_const(RegistryKind::DependencyBinding);
        services.expect_exists().returning(|_, _| Ok(false));
        services.expect_add().never();

        let registries = Registries::new()
            .bind(path("config/packages/doctrine.yaml"), Arc::new(mappings))
            .bind(path("config/services.yaml"), Arc::new(services));
        let request = GenerationRequest::new("Billing", "Invoice").with_options(GenerationOptions {
            register: true,
            dry_run: true,
            force: false,
        });

        let report = service(fs, registries).generate_entity(&request).unwrap();
        assert!(report.dry_run);
        assert!(report.files.iter().all(|f| f.status == FileStatus::Planned));
        let statuses: Vec<_> = report.registrations.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [RegistrationStatus::AlreadyPresent, RegistrationStatus::Planned]
        );
    }

    #[test]
    fn generate_dispatches_on_kind() {
        let mut fs = empty_fs();
        fs.expect_write_file().returning(|_, _| Ok(()));

        let report = service(fs, Registries::new())
            .generate(GeneratorKind::Query, &GenerationRequest::new("Shop", "GetProduct"))
            .unwrap();
        assert_eq!(report.generator, GeneratorKind::Query);
        assert_eq!(report.files.len(), 2);
    }
}
