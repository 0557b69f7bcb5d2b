//! Operation-name classification.
//!
//! Maps an operation name such as `CreateInvoice` or `AttachTagToArticle` to
//! an [`Intent`] and the entities taking part in it. The classification
//! drives which repositories a generated handler depends on and which
//! validation-then-mutation steps are pre-populated in its body.
//!
//! Classification never fails: names that match nothing degrade to
//! [`Intent::Generic`].
//!
//! # Matching
//!
//! [`VERB_TABLE`] is scanned in order and the first keyword that prefixes the
//! name (case-insensitively, ending on a word boundary) wins. Relation verbs
//! need two entities; the remainder is split on a connective word
//! ([`CONNECTIVES`]) or, failing that, after its first camel-case token.
//!
//! Plural remainders are kept as written (`CreateUsers` infers `Users`).

use std::fmt;

use serde::Serialize;

use crate::domain::naming::{camel_tokens, to_camel_case};

// ── Intent ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Create,
    Update,
    Delete,
    Activate,
    Deactivate,
    AttachRelation,
    Generic,
}

impl Intent {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::AttachRelation => "attach-relation",
            Self::Generic => "generic",
        }
    }

    pub const fn is_relation(&self) -> bool {
        matches!(self, Self::AttachRelation)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tables ───────────────────────────────────────────────────────────────────

/// One row of the verb table.
#[derive(Debug, Clone, Copy)]
pub struct VerbRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

/// Ordered verb table. First match wins.
pub static VERB_TABLE: &[VerbRule] = &[
    VerbRule {
        intent: Intent::Create,
        keywords: &["Create", "Creer", "Add", "Ajouter", "Register"],
    },
    VerbRule {
        intent: Intent::Update,
        keywords: &["Update", "Modifier", "Edit", "Rename", "Change"],
    },
    VerbRule {
        intent: Intent::Delete,
        keywords: &["Delete", "Supprimer", "Remove"],
    },
    VerbRule {
        intent: Intent::Activate,
        keywords: &["Activate", "Activer", "Enable"],
    },
    VerbRule {
        intent: Intent::Deactivate,
        keywords: &["Deactivate", "Desactiver", "Disable"],
    },
    VerbRule {
        intent: Intent::AttachRelation,
        keywords: &[
            "Attach",
            "Assign",
            "Associate",
            "Link",
            "Attribuer",
            "Associer",
            "Affecter",
            "Lier",
        ],
    },
];

/// Words that separate the two entities of a relation name.
pub static CONNECTIVES: &[&str] = &["To", "For", "With", "On", "A", "Au", "Aux", "Pour", "Avec"];

// ── Classification ───────────────────────────────────────────────────────────

/// A repository the generated handler must receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDependency {
    pub entity: String,
    /// e.g. `InvoiceRepositoryInterface`
    pub interface: String,
    /// e.g. `invoiceRepository`
    pub variable: String,
}

impl RepositoryDependency {
    pub fn for_entity(entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            interface: format!("{entity}RepositoryInterface"),
            variable: format!("{}Repository", to_camel_case(entity)),
        }
    }
}

/// One step of a generated handler body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum HandlerStep {
    /// Build a new instance from the command payload.
    Construct { entity: String },
    /// Load by id, failing with a not-found error.
    FetchOrFail { entity: String },
    /// Call the domain operation named after the verb.
    Invoke { entity: String, operation: String },
    Persist { entity: String },
    Remove { entity: String },
}

/// Result of classifying one operation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternClassification {
    intent: Intent,
    matched_prefix: String,
    inferred_entities: Vec<String>,
    relation_entity: Option<String>,
}

impl PatternClassification {
    fn generic(entities: Vec<String>) -> Self {
        Self {
            intent: Intent::Generic,
            matched_prefix: String::new(),
            inferred_entities: entities,
            relation_entity: None,
        }
    }

    pub const fn intent(&self) -> Intent {
        self.intent
    }

    /// The literal prefix that triggered the match; empty for `Generic`.
    pub fn matched_prefix(&self) -> &str {
        &self.matched_prefix
    }

    pub fn inferred_entities(&self) -> &[String] {
        &self.inferred_entities
    }

    /// Join entity of an `AttachRelation` classification.
    pub fn relation_entity(&self) -> Option<&str> {
        self.relation_entity.as_deref()
    }

    pub fn primary_entity(&self) -> Option<&str> {
        self.inferred_entities.first().map(String::as_str)
    }

    /// Domain method invoked by update-style handlers, e.g. `activate`.
    pub fn domain_operation(&self) -> Option<String> {
        match self.intent {
            Intent::Update | Intent::Activate | Intent::Deactivate => {
                Some(to_camel_case(&self.matched_prefix))
            }
            _ => None,
        }
    }

    /// One repository per participating entity, relation entity last.
    pub fn dependencies(&self) -> Vec<RepositoryDependency> {
        let mut entities: Vec<&str> = self.inferred_entities.iter().map(String::as_str).collect();
        if let Some(relation) = self.relation_entity.as_deref() {
            entities.push(relation);
        }

        let mut seen = std::collections::HashSet::new();
        entities
            .into_iter()
            .filter(|e| seen.insert(*e))
            .map(RepositoryDependency::for_entity)
            .collect()
    }

    /// Validation-then-mutation steps for the handler body.
    pub fn skeleton(&self) -> Vec<HandlerStep> {
        let Some(primary) = self.primary_entity() else {
            return Vec::new();
        };
        let entity = primary.to_string();

        match self.intent {
            Intent::Create => vec![
                HandlerStep::Construct {
                    entity: entity.clone(),
                },
                HandlerStep::Persist { entity },
            ],
            Intent::Update | Intent::Activate | Intent::Deactivate => vec![
                HandlerStep::FetchOrFail {
                    entity: entity.clone(),
                },
                HandlerStep::Invoke {
                    entity: entity.clone(),
                    operation: self.domain_operation().unwrap_or_default(),
                },
                HandlerStep::Persist { entity },
            ],
            Intent::Delete => vec![
                HandlerStep::FetchOrFail {
                    entity: entity.clone(),
                },
                HandlerStep::Remove { entity },
            ],
            Intent::AttachRelation => {
                let mut steps: Vec<HandlerStep> = self
                    .inferred_entities
                    .iter()
                    .take(2)
                    .map(|e| HandlerStep::FetchOrFail { entity: e.clone() })
                    .collect();
                if let Some(relation) = &self.relation_entity {
                    steps.push(HandlerStep::Construct {
                        entity: relation.clone(),
                    });
                    steps.push(HandlerStep::Persist {
                        entity: relation.clone(),
                    });
                }
                steps
            }
            Intent::Generic => Vec::new(),
        }
    }
}

/// Classify an operation name.
///
/// `explicit` entities, when given, replace the inferred list but never
/// change the intent.
pub fn classify(operation_name: &str, explicit: Option<&[String]>) -> PatternClassification {
    classify_with_context(operation_name, explicit, None)
}

/// Classify with the module's primary entity available as context.
///
/// The context only matters for relation verbs whose remainder names a
/// single entity (`AttribuerCadeaux` in module `Utilisateur` relates
/// `Cadeaux` to `Utilisateur`).
pub fn classify_with_context(
    operation_name: &str,
    explicit: Option<&[String]>,
    context_entity: Option<&str>,
) -> PatternClassification {
    let name = operation_name.trim();
    let explicit: Option<Vec<String>> = explicit
        .map(|list| {
            list.iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|list| !list.is_empty());
    let context_entity = context_entity.map(str::trim).filter(|c| !c.is_empty());

    let Some(verb) = match_verb(name) else {
        return PatternClassification::generic(explicit.unwrap_or_default());
    };

    if verb.intent.is_relation() {
        let (entities, relation) = match explicit {
            Some(list) => relation_from_explicit(list),
            None => match infer_relation(verb.remainder, context_entity) {
                Some((left, right)) => {
                    let relation = format!("{left}{right}");
                    (vec![left, right], Some(relation))
                }
                None => return PatternClassification::generic(Vec::new()),
            },
        };
        return PatternClassification {
            intent: verb.intent,
            matched_prefix: verb.prefix.to_string(),
            inferred_entities: entities,
            relation_entity: relation,
        };
    }

    let entities = match explicit {
        Some(list) => list,
        None => {
            let entity: String = camel_tokens(verb.remainder).concat();
            if entity.is_empty() {
                return PatternClassification::generic(Vec::new());
            }
            vec![entity]
        }
    };

    PatternClassification {
        intent: verb.intent,
        matched_prefix: verb.prefix.to_string(),
        inferred_entities: entities,
        relation_entity: None,
    }
}

struct VerbMatch<'a> {
    intent: Intent,
    prefix: &'a str,
    remainder: &'a str,
}

fn match_verb(name: &str) -> Option<VerbMatch<'_>> {
    VERB_TABLE.iter().find_map(|rule| {
        rule.keywords.iter().find_map(|keyword| {
            let head = name.get(..keyword.len())?;
            if !head.eq_ignore_ascii_case(keyword) {
                return None;
            }
            let remainder = &name[keyword.len()..];
            at_word_boundary(remainder).then_some(VerbMatch {
                intent: rule.intent,
                prefix: head,
                remainder,
            })
        })
    })
}

/// `Created` must not match `Create`; `CreateUser`, `create_user` do.
fn at_word_boundary(remainder: &str) -> bool {
    match remainder.chars().next() {
        None => true,
        Some(c) => c.is_uppercase() || c.is_ascii_digit() || c == '_' || c == '-',
    }
}

fn is_connective(token: &str) -> bool {
    CONNECTIVES.contains(&token)
}

fn infer_relation(remainder: &str, context_entity: Option<&str>) -> Option<(String, String)> {
    let mut tokens = camel_tokens(remainder);
    while tokens.last().is_some_and(|t| is_connective(t)) {
        tokens.pop();
    }
    while tokens.first().is_some_and(|t| is_connective(t)) {
        tokens.remove(0);
    }

    if let Some(pos) = tokens.iter().position(|t| is_connective(t)) {
        let left = tokens[..pos].concat();
        let right = tokens[pos + 1..]
            .iter()
            .filter(|t| !is_connective(t))
            .cloned()
            .collect::<String>();
        if !left.is_empty() && !right.is_empty() {
            return Some((left, right));
        }
    }

    match tokens.as_slice() {
        [] => None,
        [single] => context_entity
            .filter(|ctx| *ctx != single.as_str())
            .map(|ctx| (single.clone(), ctx.to_string())),
        [first, rest @ ..] => Some((first.clone(), rest.concat())),
    }
}

/// Two names relate through their concatenation and a third names the join
/// explicitly. A single name keeps the relation intent without a join entity,
/// so the handler only loads that entity.
fn relation_from_explicit(list: Vec<String>) -> (Vec<String>, Option<String>) {
    match list.as_slice() {
        [left, right] => {
            let relation = format!("{left}{right}");
            (list.clone(), Some(relation))
        }
        [left, right, relation, ..] => (
            vec![left.clone(), right.clone()],
            Some(relation.clone()),
        ),
        _ => (list, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(c: &PatternClassification) -> Vec<&str> {
        c.inferred_entities().iter().map(String::as_str).collect()
    }

    // ------------------------------------------------------------------------
    // One representative per intent
    // ------------------------------------------------------------------------

    #[test]
    fn create() {
        let c = classify("CreateInvoice", None);
        assert_eq!(c.intent(), Intent::Create);
        assert_eq!(c.matched_prefix(), "Create");
        assert_eq!(entities(&c), ["Invoice"]);
    }

    #[test]
    fn update_with_multi_word_entity() {
        let c = classify("UpdateBlogPost", None);
        assert_eq!(c.intent(), Intent::Update);
        assert_eq!(entities(&c), ["BlogPost"]);
        assert_eq!(c.domain_operation().as_deref(), Some("update"));
    }

    #[test]
    fn delete_french() {
        let c = classify("SupprimerProduit", None);
        assert_eq!(c.intent(), Intent::Delete);
        assert_eq!(c.matched_prefix(), "Supprimer");
        assert_eq!(entities(&c), ["Produit"]);
    }

    #[test]
    fn activate_and_deactivate() {
        let a = classify("ActivateAccount", None);
        assert_eq!(a.intent(), Intent::Activate);
        assert_eq!(entities(&a), ["Account"]);

        let d = classify("DeactivateAccount", None);
        assert_eq!(d.intent(), Intent::Deactivate);
        assert_eq!(entities(&d), ["Account"]);
        assert_eq!(d.domain_operation().as_deref(), Some("deactivate"));
    }

    #[test]
    fn attach_with_connective() {
        let c = classify("AttachTagToArticle", None);
        assert_eq!(c.intent(), Intent::AttachRelation);
        assert_eq!(entities(&c), ["Tag", "Article"]);
        assert_eq!(c.relation_entity(), Some("TagArticle"));
    }

    #[test]
    fn attach_with_multi_word_sides() {
        let c = classify("AssignProductCategoryToBlogPost", None);
        assert_eq!(entities(&c), ["ProductCategory", "BlogPost"]);
        assert_eq!(c.relation_entity(), Some("ProductCategoryBlogPost"));
    }

    #[test]
    fn attach_without_connective_splits_after_first_token() {
        let c = classify("AssignRoleUser", None);
        assert_eq!(c.intent(), Intent::AttachRelation);
        assert_eq!(entities(&c), ["Role", "User"]);
    }

    #[test]
    fn unrecognized_name_is_generic() {
        let c = classify("Frobnicate", None);
        assert_eq!(c.intent(), Intent::Generic);
        assert_eq!(c.matched_prefix(), "");
        assert!(c.inferred_entities().is_empty());
        assert!(c.skeleton().is_empty());
        assert!(c.dependencies().is_empty());
    }

    // ------------------------------------------------------------------------
    // Relation ambiguity
    // ------------------------------------------------------------------------

    #[test]
    fn single_entity_relation_uses_context() {
        let c = classify_with_context("AttribuerCadeaux", None, Some("Utilisateur"));
        assert_eq!(c.intent(), Intent::AttachRelation);
        assert_eq!(c.matched_prefix(), "Attribuer");
        assert_eq!(entities(&c), ["Cadeaux", "Utilisateur"]);
        assert_eq!(c.relation_entity(), Some("CadeauxUtilisateur"));
    }

    #[test]
    fn single_entity_relation_without_context_is_generic() {
        let c = classify("AttribuerCadeaux", None);
        assert_eq!(c.intent(), Intent::Generic);
        assert!(c.inferred_entities().is_empty());
    }

    #[test]
    fn trailing_connective_is_ignored() {
        let c = classify_with_context("AttachTagTo", None, Some("Article"));
        assert_eq!(entities(&c), ["Tag", "Article"]);
    }

    // ------------------------------------------------------------------------
    // Explicit entities
    // ------------------------------------------------------------------------

    #[test]
    fn explicit_entities_override_inference_not_intent() {
        let explicit = vec!["Customer".to_string(), "Address".to_string()];
        let c = classify("CreateInvoice", Some(&explicit));
        assert_eq!(c.intent(), Intent::Create);
        assert_eq!(entities(&c), ["Customer", "Address"]);
    }

    #[test]
    fn explicit_entities_on_generic() {
        let explicit = vec!["Widget".to_string()];
        let c = classify("Frobnicate", Some(&explicit));
        assert_eq!(c.intent(), Intent::Generic);
        assert_eq!(entities(&c), ["Widget"]);
    }

    #[test]
    fn explicit_relation_triple() {
        let explicit = vec!["Gift".into(), "User".into(), "Donation".into()];
        let c = classify("AttribuerCadeaux", Some(&explicit));
        assert_eq!(c.intent(), Intent::AttachRelation);
        assert_eq!(entities(&c), ["Gift", "User"]);
        assert_eq!(c.relation_entity(), Some("Donation"));
    }

    #[test]
    fn single_explicit_relation_entity_has_no_join() {
        let explicit = vec!["Tag".to_string()];
        let c = classify("AttachTag", Some(&explicit));
        assert_eq!(c.intent(), Intent::AttachRelation);
        assert_eq!(entities(&c), ["Tag"]);
        assert_eq!(c.relation_entity(), None);
        assert_eq!(
            c.skeleton(),
            vec![HandlerStep::FetchOrFail {
                entity: "Tag".into()
            }]
        );
    }

    #[test]
    fn blank_explicit_list_is_ignored() {
        let explicit = vec!["  ".to_string()];
        let c = classify("CreateInvoice", Some(&explicit));
        assert_eq!(entities(&c), ["Invoice"]);
    }

    // ------------------------------------------------------------------------
    // Matching rules
    // ------------------------------------------------------------------------

    #[test]
    fn verb_must_end_on_word_boundary() {
        assert_eq!(classify("AddressChanged", None).intent(), Intent::Generic);
        assert_eq!(classify("Created", None).intent(), Intent::Generic);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = classify("create_user", None);
        assert_eq!(c.intent(), Intent::Create);
        assert_eq!(c.matched_prefix(), "create");
        assert_eq!(entities(&c), ["User"]);
    }

    #[test]
    fn bare_verb_is_generic() {
        assert_eq!(classify("Create", None).intent(), Intent::Generic);
    }

    #[test]
    fn plural_remainder_is_not_singularized() {
        assert_eq!(entities(&classify("CreateUsers", None)), ["Users"]);
    }

    // ------------------------------------------------------------------------
    // Downstream contract
    // ------------------------------------------------------------------------

    #[test]
    fn update_skeleton_fetches_invokes_persists() {
        let c = classify("ActiverCompte", None);
        assert_eq!(
            c.skeleton(),
            vec![
                HandlerStep::FetchOrFail {
                    entity: "Compte".into()
                },
                HandlerStep::Invoke {
                    entity: "Compte".into(),
                    operation: "activer".into()
                },
                HandlerStep::Persist {
                    entity: "Compte".into()
                },
            ]
        );
    }

    #[test]
    fn delete_skeleton() {
        let c = classify("RemoveComment", None);
        assert_eq!(
            c.skeleton(),
            vec![
                HandlerStep::FetchOrFail {
                    entity: "Comment".into()
                },
                HandlerStep::Remove {
                    entity: "Comment".into()
                },
            ]
        );
    }

    #[test]
    fn relation_skeleton_and_dependencies() {
        let c = classify("LinkTagToArticle", None);
        assert_eq!(
            c.skeleton(),
            vec![
                HandlerStep::FetchOrFail { entity: "Tag".into() },
                HandlerStep::FetchOrFail {
                    entity: "Article".into()
                },
                HandlerStep::Construct {
                    entity: "TagArticle".into()
                },
                HandlerStep::Persist {
                    entity: "TagArticle".into()
                },
            ]
        );

        let deps: Vec<_> = c.dependencies().into_iter().map(|d| d.interface).collect();
        assert_eq!(
            deps,
            [
                "TagRepositoryInterface",
                "ArticleRepositoryInterface",
                "TagArticleRepositoryInterface"
            ]
        );
    }

    #[test]
    fn dependency_variable_is_camel_case() {
        let dep = RepositoryDependency::for_entity("BlogPost");
        assert_eq!(dep.variable, "blogPostRepository");
    }
}
