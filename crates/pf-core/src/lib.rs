//! # pf-core
//!
//! Core types shared by every Promptforge crate:
//! - `Domain`: the closed set of content domains plus plugin domains
//! - Validation result types produced by the validator
//! - Generation records and the capped generation history
//! - The key-value persistence surface (`Store`) with memory and file backends
//! - Input hashing for provenance
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod hash;
pub mod history;
pub mod record;
pub mod store;
pub mod validation;

pub use enums::Domain;
pub use errors::{CoreError, StoreError};
pub use history::History;
pub use record::{GenerationRecord, Provenance};
pub use store::{FileStore, MemoryStore, Store};
pub use validation::{ValidationIssue, ValidationResult};
