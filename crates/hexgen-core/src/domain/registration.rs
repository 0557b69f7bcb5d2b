//! Which registrations a generated artifact needs.
//!
//! Planning is pure: it turns a module and artifact name into the
//! [`ConfigEntry`] values to hand to the config stores. The same plan is used
//! for writing (generation) and for checking (diagnostics).

use crate::domain::{
    error::DomainError,
    layout::ProjectLayout,
    registry::ConfigEntry,
};

#[derive(Debug, Clone, Copy)]
pub struct RegistrationPlanner<'a> {
    layout: &'a ProjectLayout,
}

impl<'a> RegistrationPlanner<'a> {
    pub const fn new(layout: &'a ProjectLayout) -> Self {
        Self { layout }
    }

    /// Mapping declaration for the module plus the repository binding.
    pub fn for_entity(&self, module: &str, entity: &str) -> Result<Vec<ConfigEntry>, DomainError> {
        Ok(vec![
            self.mapping(module)?,
            ConfigEntry::dependency_binding(
                self.layout.repository_interface_fqcn(module, entity),
                self.layout.repository_fqcn(module, entity),
            )?,
        ])
    }

    pub fn for_command(&self) -> Result<Vec<ConfigEntry>, DomainError> {
        Ok(vec![ConfigEntry::bus_topology(
            &self.layout.command_bus,
            &self.layout.command_middleware,
        )?])
    }

    pub fn for_query(&self) -> Result<Vec<ConfigEntry>, DomainError> {
        Ok(vec![ConfigEntry::bus_topology(
            &self.layout.query_bus,
            &self.layout.query_middleware,
        )?])
    }

    pub fn for_controller(&self, module: &str) -> Result<Vec<ConfigEntry>, DomainError> {
        let resource = format!("../{}/", self.layout.controller_dir(module)?);
        Ok(vec![ConfigEntry::route_declaration(
            self.layout.route_group(module),
            resource,
            self.layout.controller_namespace(module),
        )?])
    }

    /// Everything a fully wired module should have registered.
    ///
    /// Without an entity only the module-wide entries are returned.
    pub fn for_module(
        &self,
        module: &str,
        entity: Option<&str>,
    ) -> Result<Vec<ConfigEntry>, DomainError> {
        let mut entries = match entity {
            Some(entity) => self.for_entity(module, entity)?,
            None => vec![self.mapping(module)?],
        };
        entries.extend(self.for_command()?);
        entries.extend(self.for_query()?);
        entries.extend(self.for_controller(module)?);
        Ok(entries)
    }

    fn mapping(&self, module: &str) -> Result<ConfigEntry, DomainError> {
        let dir = format!("%kernel.project_dir%/{}", self.layout.mapping_dir(module)?);
        ConfigEntry::type_mapping(
            module,
            &self.layout.mapping_backend,
            dir,
            self.layout.entity_namespace(module),
        )
    }
}
