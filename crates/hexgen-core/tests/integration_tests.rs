//! Integration tests for the public hexgen-core API.

use hexgen_core::domain::{BaseType, HandlerStep, RegistrationPlanner};
use hexgen_core::prelude::*;

#[test]
fn test_property_spec_to_canonical_form() {
    let props =
        parse_properties(" title : string(3,80) : unique , publishedAt:datetime:nullable ")
            .unwrap();

    let canonical: Vec<String> = props.iter().map(ToString::to_string).collect();
    assert_eq!(canonical, ["title:text(3,80):unique", "publishedAt:datetime:nullable"]);

    let reparsed = parse_properties(&canonical.join(",")).unwrap();
    assert_eq!(reparsed, props);
}

#[test]
fn test_property_errors_name_the_clause() {
    let err = parse_properties("title:text, price:money").unwrap_err();
    assert!(err.to_string().contains("money"));

    let err = parse_properties("age:int(9,1)").unwrap_err();
    assert!(err.to_string().contains("age"));
}

#[test]
fn test_lookup_keys_follow_unique_flag() {
    let props = parse_properties("email:email:unique,name:text").unwrap();
    let keys: Vec<&str> = props
        .iter()
        .filter(|p| p.is_lookup_key())
        .map(|p| p.name())
        .collect();
    assert_eq!(keys, ["email"]);
    assert_eq!(props[0].base_type(), BaseType::Email);
}

#[test]
fn test_command_classification_drives_handler() {
    let c = classify("DeactivateAccount", None);
    assert_eq!(c.intent(), Intent::Deactivate);
    assert_eq!(c.inferred_entities(), ["Account"]);

    let deps = c.dependencies();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].interface, "AccountRepositoryInterface");

    let skeleton = c.skeleton();
    assert!(matches!(skeleton.first(), Some(HandlerStep::FetchOrFail { .. })));
    assert!(matches!(skeleton.last(), Some(HandlerStep::Persist { .. })));
}

#[test]
fn test_relation_with_module_context() {
    let c = classify_with_context("AssignRole", None, Some("User"));
    assert_eq!(c.intent(), Intent::AttachRelation);
    assert_eq!(c.inferred_entities(), ["Role", "User"]);
    assert_eq!(c.relation_entity(), Some("RoleUser"));
    assert_eq!(c.dependencies().len(), 3);
}

#[test]
fn test_unknown_verb_is_generic() {
    let c = classify("ExportReport", None);
    assert_eq!(c.intent(), Intent::Generic);
    assert!(c.skeleton().is_empty());
}

#[test]
fn test_module_registration_plan() {
    let layout = ProjectLayout::default();
    let entries = RegistrationPlanner::new(&layout)
        .for_module("Billing", Some("Invoice"))
        .unwrap();

    let kinds: Vec<RegistryKind> = entries.iter().map(|e| e.kind()).collect();
    for kind in RegistryKind::ALL {
        assert!(kinds.contains(&kind), "{kind} missing");
    }

    let binding = entries
        .iter()
        .find(|e| e.kind() == RegistryKind::DependencyBinding)
        .unwrap();
    assert_eq!(binding.key(), "App\\Billing\\Domain\\Repository\\InvoiceRepositoryInterface");
    assert!(matches!(binding.payload(), EntryPayload::DependencyBinding { .. }));
}
