//! `hexgen classify`: show how an operation name is understood.

use serde::Serialize;

use hexgen_core::domain::{
    HandlerStep, PatternClassification, RepositoryDependency, classify_with_context,
};

use crate::{cli::ClassifyArgs, error::CliResult, output::OutputManager};

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    name: &'a str,
    #[serde(flatten)]
    classification: &'a PatternClassification,
    dependencies: Vec<RepositoryDependency>,
    skeleton: Vec<HandlerStep>,
}

pub fn execute(args: ClassifyArgs, output: OutputManager) -> CliResult<()> {
    let explicit = (!args.entities.is_empty()).then_some(args.entities.as_slice());
    let classification = classify_with_context(&args.name, explicit, args.context.as_deref());

    if output.is_json() {
        output.json(&ClassifyOutput {
            name: &args.name,
            classification: &classification,
            dependencies: classification.dependencies(),
            skeleton: classification.skeleton(),
        })?;
        return Ok(());
    }

    output.header(&format!("{}: {}", args.name, classification.intent()))?;
    if !classification.matched_prefix().is_empty() {
        output.print(&format!("  verb:       {}", classification.matched_prefix()))?;
    }
    output.print(&format!(
        "  entities:   [{}]",
        classification.inferred_entities().join(", ")
    ))?;
    if let Some(relation) = classification.relation_entity() {
        output.print(&format!("  relation:   {relation}"))?;
    }
    for dep in classification.dependencies() {
        output.print(&format!("  depends on: {} ${}", dep.interface, dep.variable))?;
    }

    let steps = classification.skeleton();
    if !steps.is_empty() {
        output.print("  steps:")?;
    }
    for (i, step) in steps.iter().enumerate() {
        output.print(&format!("    {}. {}", i + 1, describe(step)))?;
    }
    Ok(())
}

fn describe(step: &HandlerStep) -> String {
    match step {
        HandlerStep::Construct { entity } => format!("construct {entity}"),
        HandlerStep::FetchOrFail { entity } => format!("load {entity} or fail"),
        HandlerStep::Invoke { entity, operation } => format!("call {entity}::{operation}()"),
        HandlerStep::Persist { entity } => format!("save {entity}"),
        HandlerStep::Remove { entity } => format!("remove {entity}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_read_naturally() {
        assert_eq!(
            describe(&HandlerStep::Invoke {
                entity: "User".into(),
                operation: "activate".into()
            }),
            "call User::activate()"
        );
        assert_eq!(
            describe(&HandlerStep::FetchOrFail {
                entity: "Invoice".into()
            }),
            "load Invoice or fail"
        );
    }
}
