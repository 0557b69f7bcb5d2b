//! Diagnostic Service - checks that a module is wired into every registry.
//!
//! Read-only: only `Filesystem::exists` and `ConfigStore::exists` are called.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{Registries, ports::Filesystem},
    domain::{ProjectLayout, RegistrationPlanner, RegistryKind, validate_name},
    error::HexgenResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Error(String),
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticCheck {
    pub kind: RegistryKind,
    /// Registry file, if one is configured.
    pub path: Option<String>,
    /// `None` for the "registry file exists" check.
    pub key: Option<String>,
    pub status: CheckStatus,
}

impl DiagnosticCheck {
    fn describe(&self) -> String {
        let path = self.path.as_deref().unwrap_or("<not configured>");
        match &self.key {
            Some(key) => format!("{} '{}' registered in {}", self.kind.label(), key, path),
            None => format!("{} registry {}", self.kind.label(), path),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub module: String,
    pub checks: Vec<DiagnosticCheck>,
}

impl DiagnosticReport {
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|c| c.status == CheckStatus::Pass)
    }

    pub fn failures(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status != CheckStatus::Pass)
            .count()
    }

    /// One `[PASS]` / `[FAIL]` line per check.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for check in &self.checks {
            let line = match &check.status {
                CheckStatus::Pass => format!("[PASS] {}", check.describe()),
                CheckStatus::Fail => format!("[FAIL] {}", check.describe()),
                CheckStatus::Error(reason) => {
                    format!("[FAIL] {} (error: {reason})", check.describe())
                }
            };
            let _ = writeln!(out, "{line}");
        }
        out
    }
}

pub struct DiagnosticService {
    filesystem: Arc<dyn Filesystem>,
    registries: Registries,
    layout: ProjectLayout,
}

impl DiagnosticService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        registries: Registries,
        layout: ProjectLayout,
    ) -> Self {
        Self {
            filesystem,
            registries,
            layout,
        }
    }

    /// Check every registry for the entries `module` (and `entity`) need.
    #[instrument(skip(self))]
    pub fn diagnose(&self, module: &str, entity: Option<&str>) -> HexgenResult<DiagnosticReport> {
        let module = validate_name("module", module)?;
        let entity = entity.map(|e| validate_name("entity", e)).transpose()?;
        let expected = RegistrationPlanner::new(&self.layout).for_module(&module, entity.as_deref())?;

        let mut checks = Vec::new();
        for kind in RegistryKind::ALL {
            let Some(binding) = self.registries.get(kind) else {
                checks.push(DiagnosticCheck {
                    kind,
                    path: None,
                    key: None,
                    status: CheckStatus::Fail,
                });
                continue;
            };

            let path = binding.path.to_string();
            let file_present = self.filesystem.exists(binding.path.as_path());
            checks.push(DiagnosticCheck {
                kind,
                path: Some(path.clone()),
                key: None,
                status: if file_present {
                    CheckStatus::Pass
                } else {
                    CheckStatus::Fail
                },
            });

            for entry in expected.iter().filter(|e| e.kind() == kind) {
                let status = match binding.store.exists(binding.path.as_path(), entry.key()) {
                    Ok(true) => CheckStatus::Pass,
                    Ok(false) => CheckStatus::Fail,
                    Err(e) => CheckStatus::Error(e.to_string()),
                };
                debug!(%kind, key = entry.key(), ?status, "Registry checked");
                checks.push(DiagnosticCheck {
                    kind,
                    path: Some(path.clone()),
                    key: Some(entry.key().to_string()),
                    status,
                });
            }
        }

        Ok(DiagnosticReport { module, checks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ConfigError,
        ports::{ConfigStore, MockConfigStore, MockFilesystem},
    };
    use crate::domain::RelativePath;

    fn store(kind: RegistryKind, registered: bool) -> Arc<dyn ConfigStore> {
        let mut mock = MockConfigStore::new();
        mock.expect_kind().return_const(kind);
        mock.expect_exists().returning(move |_, _| Ok(registered));
        mock.expect_add().never();
        Arc::new(mock)
    }

    fn all_registries(registered: bool) -> Registries {
        [
            ("config/packages/doctrine.yaml", RegistryKind::TypeMapping),
            ("config/packages/messenger.yaml", RegistryKind::BusTopology),
            ("config/services.yaml", RegistryKind::DependencyBinding),
            ("config/routes.yaml", RegistryKind::RouteDeclaration),
        ]
        .into_iter()
        .fold(Registries::new(), |r, (path, kind)| {
            r.bind(RelativePath::try_new(path).unwrap(), store(kind, registered))
        })
    }

    fn fs(present: bool) -> Arc<dyn Filesystem> {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(present);
        Arc::new(fs)
    }

    #[test]
    fn fully_wired_module_is_healthy() {
        let service = DiagnosticService::new(fs(true), all_registries(true), ProjectLayout::default());
        let report = service.diagnose("Billing", Some("Invoice")).unwrap();

        // 4 file checks + mapping, binding, command bus, query bus, route
        assert_eq!(report.checks.len(), 9);
        assert!(report.is_healthy());
        assert!(report.render_plain().lines().all(|l| l.starts_with("[PASS]")));
    }

    #[test]
    fn missing_entries_fail() {
        let service = DiagnosticService::new(fs(true), all_registries(false), ProjectLayout::default());
        let report = service.diagnose("Billing", None).unwrap();

        assert!(!report.is_healthy());
        assert_eq!(report.failures(), 4);
        assert!(report
            .render_plain()
            .contains("[FAIL] route 'billing' registered in config/routes.yaml"));
    }

    #[test]
    fn unconfigured_registry_fails() {
        let service = DiagnosticService::new(fs(true), Registries::new(), ProjectLayout::default());
        let report = service.diagnose("Billing", None).unwrap();

        assert_eq!(report.checks.len(), 4);
        assert!(report.render_plain().contains("[FAIL] mapping registry <not configured>"));
    }

    #[test]
    fn store_errors_are_reported_not_raised() {
        let mut broken = MockConfigStore::new();
        broken.expect_kind().return_const(RegistryKind::DependencyBinding);
        broken.expect_exists().returning(|file, _| {
            Err(ConfigError::Parse {
                path: file.to_path_buf(),
                reason: "mapping values are not allowed here".into(),
            })
        });
        let registries = Registries::new().bind(
            RelativePath::try_new("config/services.yaml").unwrap(),
            Arc::new(broken),
        );

        let report = DiagnosticService::new(fs(true), registries, ProjectLayout::default())
            .diagnose("Billing", Some("Invoice"))
            .unwrap();

        let binding_check = report
            .checks
            .iter()
            .find(|c| c.kind == RegistryKind::DependencyBinding && c.key.is_some())
            .unwrap();
        assert!(matches!(binding_check.status, CheckStatus::Error(_)));
        assert!(report.render_plain().contains("(error: Cannot parse config/services.yaml"));
    }

    #[test]
    fn invalid_module_is_an_error() {
        let service = DiagnosticService::new(fs(true), Registries::new(), ProjectLayout::default());
        assert!(service.diagnose("", None).is_err());
    }
}
