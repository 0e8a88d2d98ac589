//! Per-render template context.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::sanitize::sanitize_value;

/// Variables, defaults, and boolean conditionals for one render call.
///
/// [`TemplateContext::merged`] combines them with a fixed precedence,
/// later layers winning on key collisions:
///
/// ```text
/// defaults < variables < conditionals
/// ```
///
/// Strings inside `variables` and `defaults` are stripped of `{{...}}`
/// sequences during the merge. Conditionals are plain booleans and need no
/// sanitizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    pub variables: Map<String, Value>,
    pub defaults: Map<String, Value>,
    pub conditionals: BTreeMap<String, bool>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_conditional(mut self, key: impl Into<String>, flag: bool) -> Self {
        self.conditionals.insert(key.into(), flag);
        self
    }

    /// Merge the three layers into one sanitized lookup object.
    #[must_use]
    pub fn merged(&self) -> Value {
        let mut merged = Map::new();
        for (key, value) in &self.defaults {
            merged.insert(key.clone(), sanitize_value(value));
        }
        for (key, value) in &self.variables {
            merged.insert(key.clone(), sanitize_value(value));
        }
        for (key, flag) in &self.conditionals {
            merged.insert(key.clone(), Value::Bool(*flag));
        }
        Value::Object(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn merge_precedence_is_defaults_variables_conditionals() {
        let ctx = TemplateContext::new()
            .with_default("tone", "neutral")
            .with_default("role", "Assistant")
            .with_default("verbose", "default")
            .with_variable("tone", "friendly")
            .with_variable("verbose", "variable")
            .with_conditional("verbose", true);

        assert_eq!(
            ctx.merged(),
            json!({"tone": "friendly", "role": "Assistant", "verbose": true})
        );
    }

    #[test]
    fn merge_sanitizes_variables_and_defaults() {
        let ctx = TemplateContext::new()
            .with_default("d", "x{{y}}")
            .with_variable("v", json!(["{{#if a}}b{{/if}}"]));
        assert_eq!(ctx.merged(), json!({"d": "x", "v": ["b"]}));
    }
}
