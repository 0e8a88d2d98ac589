//! # pf-provider
//!
//! LLM provider HTTP clients for Promptforge.
//!
//! Sends a system instruction plus a user prompt to one of:
//! - `OpenAI` chat completions (`/chat/completions`)
//! - `OpenRouter` (OpenAI-compatible)
//! - Google Gemini (`models/{model}:generateContent`)
//!
//! Providers are opaque collaborators: every failure maps onto
//! [`ProviderError`] and nothing is retried here. [`extract_json`] recovers the
//! JSON document from completion text, stripping code fences.

mod error;
mod extract;
mod gemini;
mod http;
mod openai;

pub use error::ProviderError;
pub use extract::extract_json;

use std::future::Future;
use std::time::Duration;

use pf_config::{ProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────

/// One completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instruction describing the expected output.
    pub system: String,
    /// User prompt.
    pub prompt: String,
    /// Model override; `None` uses the client's configured model.
    #[serde(default)]
    pub model: Option<String>,
}

impl CompletionRequest {
    #[must_use]
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            model: None,
        }
    }
}

/// Anything that turns a [`CompletionRequest`] into completion text.
///
/// Implemented by [`ProviderClient`]; tests substitute canned responders.
pub trait CompletionProvider: Send + Sync {
    /// Short provider label for logs and provenance.
    fn name(&self) -> &str;

    /// Run one completion and return the raw text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the configured provider.
#[derive(Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    kind: ProviderKind,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ProviderClient {
    /// Build a client from configuration. The request timeout comes from
    /// `timeout_secs`, so a hung provider surfaces as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotConfigured`] when no API key is set, or
    /// [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        if !config.is_configured() {
            return Err(ProviderError::NotConfigured(config.kind.as_str()));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("promptforge/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            kind: config.kind,
            api_key: config.api_key.clone(),
            model: config.effective_model().to_string(),
            base_url: config.effective_base_url().to_string(),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        self.kind
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_for<'a>(&'a self, request: &'a CompletionRequest) -> &'a str {
        request
            .model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.model)
    }
}

impl CompletionProvider for ProviderClient {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let model = self.model_for(request);
        tracing::debug!(provider = self.kind.as_str(), model, "sending completion request");
        let result = match self.kind {
            ProviderKind::OpenAi | ProviderKind::OpenRouter => {
                self.complete_chat(request, model).await
            }
            ProviderKind::Gemini => self.complete_gemini(request, model).await,
        };
        if let Err(error) = &result {
            tracing::warn!(provider = self.kind.as_str(), %error, "completion failed");
        }
        result
    }
}
