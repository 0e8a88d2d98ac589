//! Generation records kept in the history list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationResult;

/// How a generated document was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// SHA-256 (hex) of the canonical JSON form of the generation input.
    pub input_hash: String,
    /// Name of the domain adapter that supplied schema, template, and defaults.
    pub adapter_used: String,
    /// Number of repair passes actually executed.
    pub repair_attempts: u32,
}

/// One completed generation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub input_hash: String,
    pub domain: String,
    pub schema_version: String,
    pub template_version: String,
    /// The final (possibly repaired) prompt document.
    pub prompt: serde_json::Value,
    pub validation: ValidationResult,
    pub repair_attempts: u32,
    pub created_at: DateTime<Utc>,
}

impl GenerationRecord {
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        Provenance {
            input_hash: self.input_hash.clone(),
            adapter_used: self.domain.clone(),
            repair_attempts: self.repair_attempts,
        }
    }
}
