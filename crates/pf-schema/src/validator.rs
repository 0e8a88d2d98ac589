//! Structural validation via `jsonschema`.

use pf_core::{ValidationIssue, ValidationResult};
use serde_json::Value;

use crate::error::SchemaError;

/// A schema compiled once and reusable across documents.
pub struct SchemaValidator {
    inner: jsonschema::Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile `schema` with format assertions enabled.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Compile` if the schema is not a valid JSON Schema.
    pub fn new(schema: &Value) -> Result<Self, SchemaError> {
        let inner = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| SchemaError::Compile(format!("{e}")))?;
        Ok(Self { inner })
    }

    /// Check `document`, mapping every failure to a `{path, message, value}`
    /// issue in validator order.
    #[must_use]
    pub fn validate(&self, document: &Value) -> ValidationResult {
        let issues = self
            .inner
            .iter_errors(document)
            .map(|error| ValidationIssue {
                path: error.instance_path.to_string(),
                message: format!("{error}"),
                value: error.instance.clone().into_owned(),
            })
            .collect();
        ValidationResult::from_issues(issues)
    }
}

/// Validate `document` against `schema`.
///
/// Pure: identical inputs give identical results. A schema that does not
/// compile yields an invalid result with a single root-level issue instead
/// of an error.
#[must_use]
pub fn validate(document: &Value, schema: &Value) -> ValidationResult {
    match SchemaValidator::new(schema) {
        Ok(validator) => validator.validate(document),
        Err(error) => ValidationResult::from_issues(vec![ValidationIssue {
            path: String::new(),
            message: error.to_string(),
            value: schema.clone(),
        }]),
    }
}
