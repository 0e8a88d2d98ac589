//! Cross-cutting error types for Promptforge.
//!
//! Domain-specific errors (`TemplateError`, `SchemaError`, `ProviderError`)
//! live in their own crates. The unified `EngineError` is defined in
//! `pf-engine`, where all crate errors converge.

use thiserror::Error;

/// Errors raised by the core types and history handling.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A plugin domain name is not usable as a registry key.
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    /// Persistence surface failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored history could not be encoded or decoded.
    #[error("History serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors from the key-value persistence surface.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error in the file-backed store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Keys are restricted so they map safely onto file names.
    #[error("invalid store key '{0}': only [A-Za-z0-9_-] are allowed")]
    InvalidKey(String),
}
