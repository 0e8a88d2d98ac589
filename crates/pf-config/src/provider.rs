//! LLM provider configuration.

use serde::{Deserialize, Serialize};

/// Which provider API dialect to speak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    OpenRouter,
    Gemini,
}

impl ProviderKind {
    /// Base URL used when `base_url` is left empty.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    /// Model used when `model` is left empty.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::OpenRouter => "openai/gpt-4o-mini",
            Self::Gemini => "gemini-1.5-flash",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::OpenRouter => "openrouter",
            Self::Gemini => "gemini",
        }
    }
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    /// API key sent to the provider.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier. Empty means the kind's default model.
    #[serde(default)]
    pub model: String,

    /// Custom endpoint root. Empty means the kind's public API.
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            api_key: String::new(),
            model: String::new(),
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// Check if the provider can be called.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    #[must_use]
    pub fn effective_model(&self) -> &str {
        if self.model.is_empty() {
            self.kind.default_model()
        } else {
            &self.model
        }
    }

    /// Endpoint root with any trailing slash removed.
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        if self.base_url.is_empty() {
            self.kind.default_base_url()
        } else {
            self.base_url.trim_end_matches('/')
        }
    }
}
