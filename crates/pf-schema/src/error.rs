//! Schema registry error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested (name, version) was not found in the registry.
    #[error("Schema not found: {name}@{version}")]
    NotFound { name: String, version: String },

    /// Registered versions are immutable; a new version string is required.
    #[error("Schema {name}@{version} is already registered (versions are immutable)")]
    VersionExists { name: String, version: String },

    /// Empty or otherwise unusable name/version.
    #[error("Invalid schema key: {0}")]
    InvalidKey(String),

    /// Caller-supplied schema failed the safety allow-list.
    #[error("Schema rejected: {reasons:?}")]
    Unsafe {
        /// Human-readable reasons, one per failed check.
        reasons: Vec<String>,
    },

    /// Schema compilation error.
    #[error("Schema compilation error: {0}")]
    Compile(String),

    /// Snapshot produced by an incompatible exporter.
    #[error("Unsupported registry snapshot format version {0}")]
    UnsupportedSnapshot(u32),
}
