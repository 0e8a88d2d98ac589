//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to parse or extract.
    #[error("failed to load promptforge config: {0}")]
    Figment(#[from] figment::Error),

    /// A value parsed but is outside its allowed range.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
