//! Provider error types.

use thiserror::Error;

/// Errors from an LLM provider call. Never retried by this crate.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport error, including request timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Response body or upstream status text.
        message: String,
    },

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The completion did not contain a JSON document.
    #[error("provider returned non-JSON content: {0}")]
    NonJson(String),

    /// The response envelope lacked the expected completion text.
    #[error("unexpected provider response: {0}")]
    Malformed(String),

    /// No API key configured for the selected provider.
    #[error("provider '{0}' is not configured (set provider.api_key)")]
    NotConfigured(&'static str),
}
