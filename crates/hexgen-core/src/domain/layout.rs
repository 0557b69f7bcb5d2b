//! Where generated artifacts live inside the target project, and the
//! fully-qualified names they get.
//!
//! Modules follow a hexagonal layout:
//!
//! ```text
//! <source_dir>/<Module>/
//! ├── Application/{Command,Query}/<Name>/
//! ├── Domain/{Entity,Repository}/
//! ├── Infrastructure/Persistence/{,Mapping}/
//! └── UI/Http/
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{
    common::RelativePath,
    error::DomainError,
    naming::{capitalize, is_identifier, to_kebab_case, to_snake_case},
};

/// Project conventions shared by every generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    pub source_dir: String,
    /// Root namespace, e.g. `App`.
    pub namespace: String,
    /// Extension of generated source files, without the dot.
    pub extension: String,
    pub mapping_backend: String,
    pub command_bus: String,
    pub query_bus: String,
    pub command_middleware: Vec<String>,
    pub query_middleware: Vec<String>,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            source_dir: "src".into(),
            namespace: "App".into(),
            extension: "php".into(),
            mapping_backend: "xml".into(),
            command_bus: "command.bus".into(),
            query_bus: "query.bus".into(),
            command_middleware: vec!["doctrine_transaction".into()],
            query_middleware: Vec::new(),
        }
    }
}

impl ProjectLayout {
    pub fn module_dir(&self, module: &str) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(&self.source_dir)?.join(module)
    }

    /// `<namespace>\<Module>\<segments...>`
    pub fn fqcn(&self, module: &str, segments: &[&str]) -> String {
        let mut parts = vec![self.namespace.as_str(), module];
        parts.extend_from_slice(segments);
        parts.retain(|p| !p.is_empty());
        parts.join("\\")
    }

    pub fn entity_namespace(&self, module: &str) -> String {
        self.fqcn(module, &["Domain", "Entity"])
    }

    pub fn repository_interface_fqcn(&self, module: &str, entity: &str) -> String {
        let class = format!("{entity}RepositoryInterface");
        self.fqcn(module, &["Domain", "Repository", &class])
    }

    pub fn repository_fqcn(&self, module: &str, entity: &str) -> String {
        let class = format!("{entity}Repository");
        self.fqcn(module, &["Infrastructure", "Persistence", &class])
    }

    pub fn mapping_dir(&self, module: &str) -> Result<RelativePath, DomainError> {
        self.module_dir(module)?
            .join("Infrastructure/Persistence/Mapping")
    }

    pub fn controller_dir(&self, module: &str) -> Result<RelativePath, DomainError> {
        self.module_dir(module)?.join("UI/Http")
    }

    pub fn controller_namespace(&self, module: &str) -> String {
        self.fqcn(module, &["UI", "Http"])
    }

    /// Route group name for a module, e.g. `blog_post`.
    pub fn route_group(&self, module: &str) -> String {
        to_snake_case(module)
    }

    /// URL prefix for a module, e.g. `/blog-post`.
    pub fn route_prefix(&self, module: &str) -> String {
        format!("/{}", to_kebab_case(module))
    }
}

/// Validate a module or artifact name and return it capitalised.
pub fn validate_name(what: &'static str, name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName {
            what,
            name: name.to_string(),
            reason: "must not be empty".into(),
        });
    }
    if !is_identifier(trimmed) {
        return Err(DomainError::InvalidName {
            what,
            name: name.to_string(),
            reason: "must start with a letter and contain only letters, digits or '_'".into(),
        });
    }
    if trimmed.starts_with('_') {
        return Err(DomainError::InvalidName {
            what,
            name: name.to_string(),
            reason: "must not start with '_'".into(),
        });
    }
    Ok(capitalize(trimmed))
}
