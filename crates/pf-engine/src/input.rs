//! Generation request and response types.

use chrono::{DateTime, Utc};
use pf_core::{Provenance, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A request to generate one prompt document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptInput {
    pub domain: String,
    pub task_description: String,
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Extra template variables. Override the adapter defaults.
    #[serde(default)]
    pub variables: Map<String, Value>,
    /// Schema version to use; `None` selects the latest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Per-request override of the configured auto-repair setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_repair: Option<bool>,
}

impl PromptInput {
    #[must_use]
    pub fn new(domain: impl Into<String>, task_description: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            task_description: task_description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// The JSON form hashed for provenance.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "domain": self.domain,
            "task_description": self.task_description,
            "constraints": self.constraints,
            "variables": self.variables,
            "schema_version": self.schema_version,
        })
    }
}

/// Timestamp and provenance attached to every generated prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMeta {
    pub generated_at: DateTime<Utc>,
    pub provenance: Provenance,
}

/// The result of a generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPrompt {
    pub prompt: Value,
    pub domain: String,
    pub schema_version: String,
    pub template_version: String,
    pub validation: ValidationResult,
    pub meta: GenerationMeta,
}
