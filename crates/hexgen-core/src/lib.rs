//! hexgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the hexgen
//! boilerplate generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            hexgen-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerationService, DiagnosticService)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, ConfigStore, Renderer)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hexgen-adapters (Infrastructure)    │
//! │ (LocalFilesystem, YamlConfigStore, ...) │
//! └─────────────────────────────────────────┘
//!
//!   Domain layer (pure): property grammar, pattern classifier,
//!   config entries, registration planning, artifact plans
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use hexgen_core::domain::{Intent, classify, parse_properties};
//!
//! let props = parse_properties("nom:string(3,100):unique,age:int(0,150)").unwrap();
//! assert_eq!(props.len(), 2);
//! assert!(props[0].flags().unique);
//!
//! let c = classify("AttachTagToArticle", None);
//! assert_eq!(c.intent(), Intent::AttachRelation);
//! assert_eq!(c.relation_entity(), Some("TagArticle"));
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AddOutcome, ApplicationError, ConfigError, DiagnosticReport, DiagnosticService,
        GenerationReport, GenerationService, Registries,
        ports::{ArtifactRenderer, ConfigStore, Filesystem},
    };
    pub use crate::domain::{
        ArtifactKind, ArtifactPlan, ConfigEntry, EntryPayload, GeneratedFiles,
        GenerationOptions, GenerationRequest, GeneratorKind, Intent, PatternClassification,
        ProjectLayout, PropertyDescriptor, RegistryKind, RelativePath, RenderContext, classify,
        classify_with_context, parse_properties,
    };
    pub use crate::error::{HexgenError, HexgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
