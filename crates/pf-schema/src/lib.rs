//! # pf-schema
//!
//! JSON Schema registry, validation, and auto-repair for Promptforge.
//!
//! This crate provides:
//! - `SchemaRegistry`: named, versioned, immutable (schema, template) entries
//!   with snapshot export/import
//! - `validate_user_schema`: the safety allow-list applied to caller-supplied
//!   schemas
//! - `validate` / `SchemaValidator`: structural validation via `jsonschema`,
//!   mapped onto `pf_core::ValidationResult`
//! - `repair`: the bounded auto-repair loop
//!
//! ## Architecture
//!
//! Built-in domain schemas are declared in `pf-engine` and registered here at
//! startup. Validation results use the shared types from `pf-core` so the
//! engine and CLI can report them without depending on `jsonschema`.

mod error;
pub mod registry;
pub mod repair;
pub mod safety;
pub mod validator;
mod version;

pub use error::SchemaError;
pub use registry::{RegistrySnapshot, SchemaEntry, SchemaRegistry, SNAPSHOT_FORMAT_VERSION};
pub use repair::{RepairOutcome, repair};
pub use safety::{SchemaSafetyReport, validate_user_schema};
pub use validator::{SchemaValidator, validate};
pub use version::compare_versions;
