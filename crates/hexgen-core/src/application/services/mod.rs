//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate an entity" or "check a module".

pub mod diagnostic_service;
pub mod generation_service;

pub use diagnostic_service::{CheckStatus, DiagnosticCheck, DiagnosticReport, DiagnosticService};
pub use generation_service::{
    FileOutcome, FileStatus, GenerationReport, GenerationService, RegistrationOutcome,
    RegistrationStatus,
};
