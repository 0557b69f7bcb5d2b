//! Code blocks derived from an [`ArtifactPlan`].
//!
//! Each function returns a fragment that is substituted into a template as
//! one variable. Fragments end with a newline when non-empty so templates
//! can place them on their own line.

use std::fmt::Write as _;

use hexgen_core::domain::{
    ArtifactPlan, BaseType, Constraints, GeneratorKind, HandlerStep, PropertyDescriptor,
    naming::{capitalize, to_camel_case},
};

const INDENT: &str = "    ";

fn php_type(property: &PropertyDescriptor) -> String {
    let base = match property.base_type() {
        BaseType::Text | BaseType::Email | BaseType::Uuid => "string",
        BaseType::Integer => "int",
        BaseType::Decimal => "float",
        BaseType::Boolean => "bool",
        BaseType::Date | BaseType::DateTime => "\\DateTimeImmutable",
    };
    if property.flags().nullable {
        format!("?{base}")
    } else {
        base.to_string()
    }
}

fn constraint_note(property: &PropertyDescriptor) -> Option<String> {
    let mut notes = Vec::new();
    match property.constraints() {
        Constraints::Unbounded => {}
        Constraints::Length { .. } => notes.push(format!("length{}", property.constraints())),
        Constraints::IntegerRange { .. } | Constraints::DecimalRange { .. } => {
            notes.push(format!("range{}", property.constraints()))
        }
    }
    if property.base_type() == BaseType::Email {
        notes.push("email".into());
    }
    if property.flags().unique {
        notes.push("unique".into());
    }
    (!notes.is_empty()).then(|| notes.join(", "))
}

/// Field declarations, one per property.
pub fn properties(plan: &ArtifactPlan) -> String {
    let mut out = String::new();
    for property in &plan.properties {
        if let Some(note) = constraint_note(property) {
            let _ = writeln!(out, "{INDENT}/** {note} */");
        }
        let _ = writeln!(
            out,
            "{INDENT}private {} ${};\n",
            php_type(property),
            property.name()
        );
    }
    out
}

/// Getter and setter pairs.
pub fn accessors(plan: &ArtifactPlan) -> String {
    let mut out = String::new();
    for property in &plan.properties {
        let name = property.name();
        let method = capitalize(name);
        let ty = php_type(property);
        let _ = write!(
            out,
            "\n{INDENT}public function get{method}(): {ty}\n{INDENT}{{\n{INDENT}{INDENT}return $this->{name};\n{INDENT}}}\n\
             \n{INDENT}public function set{method}({ty} ${name}): void\n{INDENT}{{\n{INDENT}{INDENT}$this->{name} = ${name};\n{INDENT}}}\n"
        );
    }
    out
}

/// Lookup signatures for unique properties (repository interface).
pub fn lookups(plan: &ArtifactPlan) -> String {
    let entity = &plan.name;
    let mut out = String::new();
    for property in plan.properties.iter().filter(|p| p.is_lookup_key()) {
        let name = property.name();
        let method = capitalize(name);
        let ty = php_type(property);
        let _ = write!(
            out,
            "\n{INDENT}public function findOneBy{method}({ty} ${name}): ?{entity};\n\
             \n{INDENT}public function existsBy{method}({ty} ${name}): bool;\n"
        );
    }
    out
}

/// Lookup implementations for unique properties (repository).
pub fn lookup_impls(plan: &ArtifactPlan) -> String {
    let entity = &plan.name;
    let mut out = String::new();
    for property in plan.properties.iter().filter(|p| p.is_lookup_key()) {
        let name = property.name();
        let method = capitalize(name);
        let ty = php_type(property);
        let _ = write!(
            out,
            "\n{INDENT}public function findOneBy{method}({ty} ${name}): ?{entity}\n{INDENT}{{\n\
             {INDENT}{INDENT}return $this->entityManager->getRepository({entity}::class)->findOneBy(['{name}' => ${name}]);\n\
             {INDENT}}}\n\
             \n{INDENT}public function existsBy{method}({ty} ${name}): bool\n{INDENT}{{\n\
             {INDENT}{INDENT}return null !== $this->findOneBy{method}(${name});\n\
             {INDENT}}}\n"
        );
    }
    out
}

/// `use` statements for the handler's repository interfaces.
pub fn uses(plan: &ArtifactPlan) -> String {
    let mut out = String::new();
    if let Some(classification) = &plan.classification {
        for dep in classification.dependencies() {
            let fqcn = plan.layout.repository_interface_fqcn(&plan.module, &dep.entity);
            let _ = writeln!(out, "use {fqcn};");
        }
    }
    out
}

/// Constructor-promoted repository parameters.
pub fn dependencies(plan: &ArtifactPlan) -> String {
    let mut out = String::new();
    if let Some(classification) = &plan.classification {
        for dep in classification.dependencies() {
            let _ = writeln!(
                out,
                "{INDENT}{INDENT}private readonly {} ${},",
                dep.interface, dep.variable
            );
        }
    }
    out
}

/// Identifier fields the message carries, one per entity the handler loads.
pub fn message_fields(plan: &ArtifactPlan) -> String {
    let mut out = String::new();
    for step in handler_steps(plan) {
        if let HandlerStep::FetchOrFail { entity } = step {
            let _ = writeln!(
                out,
                "{INDENT}{INDENT}public readonly string ${}Id,",
                to_camel_case(&entity)
            );
        }
    }
    out
}

fn handler_steps(plan: &ArtifactPlan) -> Vec<HandlerStep> {
    plan.classification
        .as_ref()
        .map(|c| c.skeleton())
        .unwrap_or_default()
}

/// Handler body built from the classification skeleton.
pub fn handler_body(plan: &ArtifactPlan) -> String {
    let message = match plan.generator {
        GeneratorKind::Query => "query",
        _ => "command",
    };
    let steps = handler_steps(plan);
    let pad = format!("{INDENT}{INDENT}");

    if steps.is_empty() {
        return format!("{pad}throw new \\LogicException('{} is not implemented yet.');\n", plan.name);
    }

    let mut out = String::new();
    for step in steps {
        let _ = match step {
            HandlerStep::Construct { entity } => {
                let var = to_camel_case(&entity);
                writeln!(out, "{pad}${var} = new {entity}();")
            }
            HandlerStep::FetchOrFail { entity } => {
                let var = to_camel_case(&entity);
                writeln!(
                    out,
                    "{pad}${var} = $this->{var}Repository->find(${message}->{var}Id)\n\
                     {pad}{INDENT}?? throw new \\DomainException('{entity} not found.');"
                )
            }
            HandlerStep::Invoke { entity, operation } => {
                writeln!(out, "{pad}${}->{operation}();", to_camel_case(&entity))
            }
            HandlerStep::Persist { entity } => {
                let var = to_camel_case(&entity);
                writeln!(out, "{pad}$this->{var}Repository->save(${var});")
            }
            HandlerStep::Remove { entity } => {
                let var = to_camel_case(&entity);
                writeln!(out, "{pad}$this->{var}Repository->remove(${var});")
            }
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgen_core::domain::{ProjectLayout, classify_with_context, parse_properties};

    fn entity_plan(props: &str) -> ArtifactPlan {
        ArtifactPlan::new(GeneratorKind::Entity, "Billing", "Invoice", &ProjectLayout::default())
            .unwrap()
            .with_properties(parse_properties(props).unwrap())
    }

    fn command_plan(name: &str) -> ArtifactPlan {
        ArtifactPlan::new(GeneratorKind::Command, "Billing", name, &ProjectLayout::default())
            .unwrap()
            .with_classification(classify_with_context(name, None, Some("Billing")))
    }

    #[test]
    fn properties_carry_types_and_notes() {
        let block = properties(&entity_plan("number:string(3,20):unique,paidAt:datetime:nullable"));
        assert!(block.contains("/** length(3,20), unique */"));
        assert!(block.contains("private string $number;"));
        assert!(block.contains("private ?\\DateTimeImmutable $paidAt;"));
    }

    #[test]
    fn only_unique_properties_get_lookups() {
        let plan = entity_plan("number:string:unique,total:decimal");
        let block = lookups(&plan);
        assert!(block.contains("findOneByNumber(string $number): ?Invoice;"));
        assert!(block.contains("existsByNumber(string $number): bool;"));
        assert!(!block.contains("Total"));
        assert!(lookup_impls(&plan).contains("findOneBy(['number' => $number])"));
    }

    #[test]
    fn accessors_per_property() {
        let block = accessors(&entity_plan("active:bool"));
        assert!(block.contains("public function getActive(): bool"));
        assert!(block.contains("public function setActive(bool $active): void"));
    }

    #[test]
    fn create_handler_constructs_and_saves() {
        let plan = command_plan("CreateInvoice");
        let body = handler_body(&plan);
        assert!(body.contains("$invoice = new Invoice();"));
        assert!(body.contains("$this->invoiceRepository->save($invoice);"));
        assert!(dependencies(&plan).contains("private readonly InvoiceRepositoryInterface $invoiceRepository,"));
        assert!(uses(&plan).contains("use App\\Billing\\Domain\\Repository\\InvoiceRepositoryInterface;"));
        assert!(message_fields(&plan).is_empty());
    }

    #[test]
    fn delete_handler_fetches_then_removes() {
        let plan = command_plan("DeleteInvoice");
        let body = handler_body(&plan);
        let fetch = body.find("->find($command->invoiceId)").unwrap();
        let remove = body.find("->remove($invoice)").unwrap();
        assert!(fetch < remove);
        assert!(message_fields(&plan).contains("public readonly string $invoiceId,"));
    }

    #[test]
    fn unrecognised_name_gets_placeholder_body() {
        let plan = command_plan("RecalculateTotals");
        assert!(handler_body(&plan).contains("LogicException"));
        assert!(dependencies(&plan).is_empty());
    }
}
