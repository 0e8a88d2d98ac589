//! Domain adapter table.
//!
//! Each built-in domain lives in its own module and contributes a
//! [`DomainAdapter`]: required input fields, template defaults, the JSON
//! Schema, the template, and example documents. The table is assembled once
//! at startup; plugin domains must be registered before it is handed to the
//! [`Engine`](crate::Engine).

mod analysis;
mod chat;
mod code;
mod image;

use std::collections::BTreeMap;

use pf_core::Domain;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::EngineError;

/// Static description of one content domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainAdapter {
    pub domain: Domain,
    pub description: String,
    /// Input fields that must be present and non-empty. `task_description`
    /// is checked against the request itself, everything else against
    /// `variables`.
    pub required_fields: Vec<String>,
    /// Template defaults, also used by repair to fill missing properties.
    pub defaults: Map<String, Value>,
    pub schema: Value,
    pub template: String,
    pub examples: Vec<Value>,
    /// Instruction sent to an LLM provider in AI mode.
    pub system_instruction: String,
}

impl DomainAdapter {
    #[must_use]
    pub fn name(&self) -> &str {
        self.domain.as_str()
    }
}

/// Convert a `json!` object literal into a map. Non-objects yield an empty map.
pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Domain → adapter mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterTable {
    adapters: BTreeMap<Domain, DomainAdapter>,
}

impl Default for AdapterTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AdapterTable {
    /// The built-in domains: chat, code, image, analysis.
    #[must_use]
    pub fn builtin() -> Self {
        let adapters = [chat::adapter(), code::adapter(), image::adapter(), analysis::adapter()]
            .into_iter()
            .map(|adapter| (adapter.domain.clone(), adapter))
            .collect();
        Self { adapters }
    }

    /// An empty table, for callers that only want plugin domains.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            adapters: BTreeMap::new(),
        }
    }

    /// Add a plugin domain under `name`. The adapter's `domain` field is
    /// overwritten with `Domain::Plugin(name)`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidRequest` if the name is not a valid
    /// plugin name, collides with a built-in domain, or is already taken.
    pub fn register_plugin(
        &mut self,
        name: &str,
        mut adapter: DomainAdapter,
    ) -> Result<(), EngineError> {
        let domain =
            Domain::plugin(name).map_err(|e| EngineError::InvalidRequest(e.to_string()))?;
        if self.adapters.contains_key(&domain) {
            return Err(EngineError::InvalidRequest(format!(
                "plugin domain '{name}' is already registered"
            )));
        }
        tracing::debug!(domain = name, "registered plugin domain");
        adapter.domain = domain.clone();
        self.adapters.insert(domain, adapter);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, domain: &Domain) -> Option<&DomainAdapter> {
        self.adapters.get(domain)
    }

    /// Find an adapter by name: built-ins case-insensitively, plugins exactly.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&DomainAdapter> {
        let domain = Domain::builtin(name).unwrap_or_else(|| Domain::Plugin(name.trim().to_string()));
        self.adapters.get(&domain)
    }

    /// Registered domains in table order (built-ins first).
    #[must_use]
    pub fn domains(&self) -> Vec<&Domain> {
        self.adapters.keys().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainAdapter> {
        self.adapters.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_schema::{validate, validate_user_schema};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn plugin_adapter() -> DomainAdapter {
        DomainAdapter {
            domain: Domain::Chat,
            description: "Email drafts".into(),
            required_fields: vec!["task_description".into()],
            defaults: object(json!({"tone": "formal"})),
            schema: json!({
                "$schema": "http://json-schema.org/draft-07/schema#",
                "type": "object",
                "required": ["subject"],
                "properties": {"subject": {"type": "string"}}
            }),
            template: r#"{"subject": "{{task_description}}"}"#.into(),
            examples: vec![json!({"subject": "Hello"})],
            system_instruction: "Draft an email.".into(),
        }
    }

    #[test]
    fn builtin_table_has_four_domains_in_order() {
        let table = AdapterTable::builtin();
        let names: Vec<&str> = table.domains().iter().map(|d| d.as_str()).collect();
        assert_eq!(names, vec!["chat", "code", "image", "analysis"]);
    }

    #[test]
    fn builtin_schemas_pass_the_allow_list() {
        for adapter in AdapterTable::builtin().iter() {
            let report = validate_user_schema(&adapter.schema);
            assert!(report.accepted, "{}: {:?}", adapter.name(), report.reasons);
        }
    }

    #[test]
    fn builtin_examples_validate() {
        for adapter in AdapterTable::builtin().iter() {
            assert!(!adapter.examples.is_empty(), "{} has no examples", adapter.name());
            for example in &adapter.examples {
                let result = validate(example, &adapter.schema);
                assert!(result.valid, "{}: {:?}", adapter.name(), result.errors);
            }
        }
    }

    #[rstest]
    #[case("chat", Some(Domain::Chat))]
    #[case("Chat", Some(Domain::Chat))]
    #[case(" code ", Some(Domain::Code))]
    #[case("IMAGE", Some(Domain::Image))]
    #[case("unknown", None)]
    fn lookup_is_case_insensitive_for_builtins(
        #[case] name: &str,
        #[case] expected: Option<Domain>,
    ) {
        let table = AdapterTable::builtin();
        assert_eq!(table.lookup(name).map(|a| a.domain.clone()), expected);
    }

    #[test]
    fn plugins_register_once() {
        let mut table = AdapterTable::builtin();
        table.register_plugin("email", plugin_adapter()).unwrap();
        assert_eq!(
            table.lookup("email").unwrap().domain,
            Domain::Plugin("email".into())
        );
        assert_eq!(table.len(), 5);

        assert!(table.register_plugin("email", plugin_adapter()).is_err());
        assert!(table.register_plugin("chat", plugin_adapter()).is_err());
        assert!(table.register_plugin("Bad Name", plugin_adapter()).is_err());
    }

    #[test]
    fn empty_table_accepts_plugins() {
        let mut table = AdapterTable::empty();
        assert!(table.is_empty());
        table.register_plugin("email", plugin_adapter()).unwrap();
        assert_eq!(table.domains(), vec![&Domain::Plugin("email".into())]);
    }
}
