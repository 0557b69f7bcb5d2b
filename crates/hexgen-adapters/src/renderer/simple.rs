//! Variable substitution renderer.

use tracing::{debug, instrument};

use hexgen_core::{
    application::{ApplicationError, ports::ArtifactRenderer},
    domain::{ArtifactPlan, GeneratedFiles, GeneratorKind, RenderContext},
    error::HexgenResult,
};

use super::{blocks, templates::TemplateSet};

/// Renders every planned artifact by substituting `{{VARIABLE}}`
/// placeholders in its template.
#[derive(Debug, Clone, Default)]
pub struct SimpleRenderer {
    templates: TemplateSet,
}

impl SimpleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: TemplateSet) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    fn context(plan: &ArtifactPlan) -> RenderContext {
        let bus = match plan.generator {
            GeneratorKind::Query => plan.layout.query_bus.as_str(),
            _ => plan.layout.command_bus.as_str(),
        };

        plan.context
            .clone()
            .with_variable("PROPERTIES", blocks::properties(plan))
            .with_variable("ACCESSORS", blocks::accessors(plan))
            .with_variable("LOOKUPS", blocks::lookups(plan))
            .with_variable("LOOKUP_IMPLS", blocks::lookup_impls(plan))
            .with_variable("USES", blocks::uses(plan))
            .with_variable("DEPENDENCIES", blocks::dependencies(plan))
            .with_variable("MESSAGE_FIELDS", blocks::message_fields(plan))
            .with_variable("HANDLER_BODY", blocks::handler_body(plan))
            .with_variable("BUS", bus)
            .with_variable("ROUTE_PREFIX", plan.layout.route_prefix(&plan.module))
    }
}

impl ArtifactRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(generator = %plan.generator, name = %plan.name))]
    fn render(&self, plan: &ArtifactPlan) -> HexgenResult<GeneratedFiles> {
        if plan.artifacts.is_empty() {
            return Err(ApplicationError::RenderingFailed {
                reason: format!("nothing planned for {} '{}'", plan.generator, plan.name),
            }
            .into());
        }

        let context = Self::context(plan);
        let mut files = GeneratedFiles::new();
        for artifact in &plan.artifacts {
            let content = context.render(self.templates.get(artifact.kind));
            debug!(kind = %artifact.kind, path = %artifact.path, bytes = content.len(), "Rendered");
            files.add(artifact.kind, artifact.path.clone(), content);
        }

        files.validate()?;
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgen_core::domain::{
        ArtifactKind, ProjectLayout, classify_with_context, parse_properties,
    };

    fn layout() -> ProjectLayout {
        ProjectLayout::default()
    }

    #[test]
    fn entity_renders_three_files() {
        let plan = ArtifactPlan::new(GeneratorKind::Entity, "Billing", "Invoice", &layout())
            .unwrap()
            .with_properties(parse_properties("number:string(3,20):unique").unwrap());

        let files = SimpleRenderer::new().render(&plan).unwrap();
        assert_eq!(files.len(), 3);

        let entity = files.iter().find(|f| f.kind == ArtifactKind::Entity).unwrap();
        assert!(entity.content.contains("namespace App\\Billing\\Domain\\Entity;"));
        assert!(entity.content.contains("private string $number;"));
        assert!(!entity.content.contains("{{"));

        let interface = files
            .iter()
            .find(|f| f.kind == ArtifactKind::RepositoryInterface)
            .unwrap();
        assert!(interface.content.contains("findOneByNumber"));
    }

    #[test]
    fn query_handler_uses_query_bus() {
        let plan = ArtifactPlan::new(GeneratorKind::Query, "Billing", "GetInvoice", &layout())
            .unwrap()
            .with_classification(classify_with_context("GetInvoice", None, Some("Billing")));

        let files = SimpleRenderer::new().render(&plan).unwrap();
        let handler = files.iter().find(|f| f.kind == ArtifactKind::QueryHandler).unwrap();
        assert!(handler.content.contains("#[AsMessageHandler(bus: 'query.bus')]"));
        assert!(handler.content.contains("GetInvoiceQuery $query"));
    }

    #[test]
    fn controller_carries_route_prefix() {
        let plan =
            ArtifactPlan::new(GeneratorKind::Controller, "BlogPost", "Article", &layout()).unwrap();
        let files = SimpleRenderer::new().render(&plan).unwrap();
        let controller = files.iter().next().unwrap();
        assert!(controller.content.contains("#[Route('/blog-post/article'"));
    }

    #[test]
    fn override_template_wins() {
        let templates = TemplateSet::builtin().with_template(ArtifactKind::Controller, "// {{NAME}} in {{MODULE}}");
        let plan = ArtifactPlan::new(GeneratorKind::Controller, "Shop", "Cart", &layout()).unwrap();

        let files = SimpleRenderer::with_templates(templates).render(&plan).unwrap();
        assert_eq!(files.iter().next().unwrap().content, "// Cart in Shop");
    }
}
