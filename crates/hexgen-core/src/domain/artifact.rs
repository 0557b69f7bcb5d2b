//! Generation requests, artifact plans and rendered output.
//!
//! ```text
//! GenerationRequest ──plan──▶ ArtifactPlan ──render──▶ GeneratedFiles
//!  (names, raw props)          (paths, descriptors,     (path + content)
//!                               classification, ctx)
//! ```
//!
//! An [`ArtifactPlan`] carries structured data only. Turning it into text is
//! the renderer's job.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::domain::{
    common::RelativePath,
    error::DomainError,
    layout::ProjectLayout,
    naming::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case},
    pattern::PatternClassification,
    property::PropertyDescriptor,
};

// ── Kinds ────────────────────────────────────────────────────────────────────

/// What the user asked to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Entity,
    Command,
    Query,
    Controller,
}

impl GeneratorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Command => "command",
            Self::Query => "query",
            Self::Controller => "controller",
        }
    }

    /// Files produced, in write order.
    pub const fn artifacts(&self) -> &'static [ArtifactKind] {
        match self {
            Self::Entity => &[
                ArtifactKind::Entity,
                ArtifactKind::RepositoryInterface,
                ArtifactKind::Repository,
            ],
            Self::Command => &[ArtifactKind::Command, ArtifactKind::CommandHandler],
            Self::Query => &[ArtifactKind::Query, ArtifactKind::QueryHandler],
            Self::Controller => &[ArtifactKind::Controller],
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated file type. Doubles as the template name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Entity,
    RepositoryInterface,
    Repository,
    Command,
    CommandHandler,
    Query,
    QueryHandler,
    Controller,
}

impl ArtifactKind {
    pub const ALL: [Self; 8] = [
        Self::Entity,
        Self::RepositoryInterface,
        Self::Repository,
        Self::Command,
        Self::CommandHandler,
        Self::Query,
        Self::QueryHandler,
        Self::Controller,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::RepositoryInterface => "repository-interface",
            Self::Repository => "repository",
            Self::Command => "command",
            Self::CommandHandler => "command-handler",
            Self::Query => "query",
            Self::QueryHandler => "query-handler",
            Self::Controller => "controller",
        }
    }

    pub fn from_template_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Path below the module directory, without extension.
    pub fn relative_stem(&self, name: &str) -> String {
        match self {
            Self::Entity => format!("Domain/Entity/{name}"),
            Self::RepositoryInterface => format!("Domain/Repository/{name}RepositoryInterface"),
            Self::Repository => format!("Infrastructure/Persistence/{name}Repository"),
            Self::Command => format!("Application/Command/{name}/{name}Command"),
            Self::CommandHandler => format!("Application/Command/{name}/{name}Handler"),
            Self::Query => format!("Application/Query/{name}/{name}Query"),
            Self::QueryHandler => format!("Application/Query/{name}/{name}Handler"),
            Self::Controller => format!("UI/Http/{name}Controller"),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Request ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    /// Add the planned entries to the configured registries.
    pub register: bool,
    /// Overwrite files that already exist.
    pub force: bool,
    /// Plan and render but write nothing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub module: String,
    pub name: String,
    /// Raw property specification, entity generator only.
    pub properties: Option<String>,
    /// Explicit entity list overriding classifier inference.
    pub entities: Option<Vec<String>>,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_properties(mut self, raw: impl Into<String>) -> Self {
        self.properties = Some(raw.into());
        self
    }

    pub fn with_entities(mut self, entities: Vec<String>) -> Self {
        self.entities = Some(entities);
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

// ── RenderContext ────────────────────────────────────────────────────────────

/// Variables available to templates as `{{VARIABLE}}`.
///
/// | Variable | Example |
/// |----------|---------|
/// | `NAME` | "BlogPost" |
/// | `NAME_SNAKE` | "blog_post" |
/// | `NAME_KEBAB` | "blog-post" |
/// | `NAME_PASCAL` | "BlogPost" |
/// | `NAME_CAMEL` | "blogPost" |
/// | `MODULE` | "Content" |
/// | `MODULE_SNAKE` | "content" |
/// | `NAMESPACE` | "App\Content" |
/// | `YEAR` | "2026" |
///
/// Artifact blocks (`PROPERTIES`, `HANDLER_BODY`, ...) are added by the
/// renderer with [`RenderContext::with_variable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    name: String,
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(name: &str, module: &str, layout: &ProjectLayout) -> Self {
        let mut vars = HashMap::new();

        vars.insert("NAME".to_string(), name.to_string());
        vars.insert("NAME_SNAKE".to_string(), to_snake_case(name));
        vars.insert("NAME_KEBAB".to_string(), to_kebab_case(name));
        vars.insert("NAME_PASCAL".to_string(), to_pascal_case(name));
        vars.insert("NAME_CAMEL".to_string(), to_camel_case(name));
        vars.insert("MODULE".to_string(), module.to_string());
        vars.insert("MODULE_SNAKE".to_string(), to_snake_case(module));
        vars.insert("NAMESPACE".to_string(), layout.fqcn(module, &[]));
        vars.insert("YEAR".to_string(), Utc::now().year().to_string());

        Self {
            name: name.to_string(),
            variables: vars,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace `{{VARIABLE}}` placeholders. Unknown placeholders are left as is.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

// ── Plan ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub kind: ArtifactKind,
    pub path: RelativePath,
}

/// Everything the renderer needs for one generation step.
#[derive(Debug, Clone)]
pub struct ArtifactPlan {
    pub generator: GeneratorKind,
    pub module: String,
    pub name: String,
    pub layout: ProjectLayout,
    pub artifacts: Vec<PlannedArtifact>,
    pub properties: Vec<PropertyDescriptor>,
    pub classification: Option<PatternClassification>,
    pub context: RenderContext,
}

impl ArtifactPlan {
    /// Resolve artifact paths for `generator` under the module directory.
    pub fn new(
        generator: GeneratorKind,
        module: &str,
        name: &str,
        layout: &ProjectLayout,
    ) -> Result<Self, DomainError> {
        let module_dir = layout.module_dir(module)?;
        let artifacts = generator
            .artifacts()
            .iter()
            .map(|kind| {
                let file = format!("{}.{}", kind.relative_stem(name), layout.extension);
                Ok(PlannedArtifact {
                    kind: *kind,
                    path: module_dir.join(file)?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Self {
            generator,
            module: module.to_string(),
            name: name.to_string(),
            layout: layout.clone(),
            artifacts,
            properties: Vec::new(),
            classification: None,
            context: RenderContext::new(name, module, layout),
        })
    }

    pub fn with_properties(mut self, properties: Vec<PropertyDescriptor>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_classification(mut self, classification: PatternClassification) -> Self {
        self.classification = Some(classification);
        self
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub kind: ArtifactKind,
    pub path: RelativePath,
    pub content: String,
}

/// Rendered files, ready to be written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedFiles {
    files: Vec<GeneratedFile>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ArtifactKind, path: RelativePath, content: String) {
        self.files.push(GeneratedFile {
            kind,
            path,
            content,
        });
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "generated files",
            });
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for GeneratedFiles {
    type Item = GeneratedFile;
    type IntoIter = std::vec::IntoIter<GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}
