//! Core domain layer for hexgen.
//!
//! Pure logic only: no I/O and no logging. Everything here is a function
//! of its inputs, which keeps the parser and classifier trivially testable.
//!
//! - [`property`]: `name:type(min,max):option` grammar
//! - [`pattern`]: operation-name classification
//! - [`registry`] / [`registration`]: config entries and what to register
//! - [`layout`] / [`artifact`]: where generated files go and what they carry

pub mod artifact;
pub mod common;
pub mod error;
pub mod layout;
pub mod naming;
pub mod pattern;
pub mod property;
pub mod registration;
pub mod registry;

pub use artifact::{
    ArtifactKind, ArtifactPlan, GeneratedFile, GeneratedFiles, GenerationOptions,
    GenerationRequest, GeneratorKind, PlannedArtifact, RenderContext,
};
pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory, PropertyParseError};
pub use layout::{ProjectLayout, validate_name};
pub use pattern::{
    HandlerStep, Intent, PatternClassification, RepositoryDependency, classify,
    classify_with_context,
};
pub use property::{
    BaseType, BoundKind, Constraints, PropertyDescriptor, PropertyFlags, parse_properties,
};
pub use registration::RegistrationPlanner;
pub use registry::{BackupRecord, ConfigEntry, EntryPayload, RegistryKind};
