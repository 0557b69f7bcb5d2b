// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported more than once by the CLI)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid {what} name '{name}': {reason}")]
    InvalidName {
        what: &'static str,
        name: String,
        reason: String,
    },

    #[error("Invalid {kind} entry '{key}': {reason}")]
    InvalidEntry {
        kind: String,
        key: String,
        reason: String,
    },

    #[error("Unknown registry kind '{value}'")]
    UnknownRegistryKind { value: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Duplicate path in generated output: {path}")]
    DuplicatePath { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { what, .. } => vec![
                format!("A {what} name must be a valid identifier"),
                "Use letters, digits and underscores, starting with a letter".into(),
                "Examples: Billing, BlogPost, CreateInvoice".into(),
            ],
            Self::UnknownRegistryKind { .. } => vec![
                "Known registries: type-mapping, bus-topology, dependency-binding, route-declaration"
                    .into(),
            ],
            Self::InvalidEntry { kind, .. } => vec![
                format!("The {kind} registration could not be built"),
                "Check the [registries] and [generation] sections of hexgen.toml".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. } | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidEntry { .. } | Self::UnknownRegistryKind { .. } => {
                ErrorCategory::Configuration
            }
            Self::AbsolutePathNotAllowed { .. } | Self::DuplicatePath { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

/// Failure to parse a property specification string.
///
/// Parsing is all-or-nothing: any of these aborts the whole input and no
/// partial property list is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyParseError {
    #[error("unbalanced ')' at position {position}")]
    UnexpectedClose { position: usize },

    #[error("unterminated constraint group in '{clause}'")]
    UnterminatedGroup { clause: String },

    #[error("empty property clause at index {index}")]
    EmptyClause { index: usize },

    #[error("malformed clause '{clause}': expected name:type")]
    MalformedClause { clause: String },

    #[error("invalid property name '{name}'")]
    InvalidName { name: String },

    #[error("unknown type '{type_name}' for property '{name}'")]
    UnknownType { name: String, type_name: String },

    #[error("property '{name}' of type {base_type} does not accept bounds")]
    BoundsNotAllowed { name: String, base_type: String },

    #[error("malformed bounds '{group}' for property '{name}': {reason}")]
    MalformedBounds {
        name: String,
        group: String,
        reason: String,
    },

    #[error("bound '{value}' of property '{name}' is not a valid {expected}")]
    NonNumericBound {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("property '{name}' has min {min} greater than max {max}")]
    InvertedBounds {
        name: String,
        min: String,
        max: String,
    },

    #[error("unknown option '{option}' on property '{name}'")]
    UnknownOption { name: String, option: String },

    #[error("property '{name}' is declared more than once")]
    DuplicateProperty { name: String },
}

impl PropertyParseError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        let grammar = "Grammar: name:type(min,max):option, e.g. title:string(3,100):unique";
        match self {
            Self::UnknownType { .. } => vec![
                "Known types: string, int, decimal, bool, date, datetime, email, uuid".into(),
                grammar.into(),
            ],
            Self::UnknownOption { .. } => vec![
                "Known options: unique, nullable".into(),
                grammar.into(),
            ],
            Self::BoundsNotAllowed { .. } => vec![
                "Only string, int and decimal properties take (min,max) bounds".into(),
            ],
            Self::InvertedBounds { .. } => vec!["Swap the bounds so that min <= max".into()],
            _ => vec![grammar.into()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}
