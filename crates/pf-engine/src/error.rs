//! Unified error taxonomy for prompt generation.

use pf_core::{CoreError, ValidationIssue};
use pf_provider::ProviderError;
use pf_schema::SchemaError;
use pf_template::TemplateError;
use thiserror::Error;

/// Every failure a public engine operation can report.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested domain is neither built in nor registered as a plugin.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    /// Malformed top-level input (empty fields, missing required variables).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The final document failed validation under strict generation.
    #[error("generated prompt failed validation with {} error(s)", errors.len())]
    Validation { errors: Vec<ValidationIssue> },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// History or autosave persistence failed.
    #[error("store error: {0}")]
    Store(#[from] CoreError),
}
