//! Validation result types.

use serde::{Deserialize, Serialize};

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON Pointer to the offending value (`""` for the document root).
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The offending value as found in the document.
    pub value: serde_json::Value,
}

/// Outcome of validating a document against a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// A passing result with no issues.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from a list of issues. Valid iff the list is empty.
    #[must_use]
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Messages formatted as `path: message`, for logs and error display.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|issue| {
                if issue.path.is_empty() {
                    issue.message.clone()
                } else {
                    format!("{}: {}", issue.path, issue.message)
                }
            })
            .collect()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}
