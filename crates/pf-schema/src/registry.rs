//! Named, versioned registry of (schema, template) pairs.
//!
//! Entries are immutable once registered. New versions are additive; a
//! (name, version) pair that already exists is refused rather than replaced.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use pf_core::ValidationResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;
use crate::safety::{check_import_hazards, validate_user_schema};
use crate::validator::SchemaValidator;
use crate::version::compare_versions;

/// Format version written into every [`RegistrySnapshot`].
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// One registered (name, version).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub name: String,
    pub version: String,
    pub schema: Value,
    pub template: String,
    #[serde(default)]
    pub examples: Vec<Value>,
    #[serde(default)]
    pub changelog: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl SchemaEntry {
    /// Build an entry stamped with the current time.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        schema: Value,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            schema,
            template: template.into(),
            examples: Vec::new(),
            changelog: None,
            registered_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_examples(mut self, examples: Vec<Value>) -> Self {
        self.examples = examples;
        self
    }

    #[must_use]
    pub fn with_changelog(mut self, changelog: impl Into<String>) -> Self {
        self.changelog = Some(changelog.into());
        self
    }
}

/// Serialized form of a whole registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    pub entries: Vec<SchemaEntry>,
}

/// Registry of schema entries keyed by name, each name holding its versions
/// in ascending natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    entries: BTreeMap<String, Vec<SchemaEntry>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `schema` and `template` under (name, version).
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidKey` for an empty name or version and
    /// `SchemaError::VersionExists` if the pair is already registered.
    pub fn register_schema(
        &mut self,
        name: &str,
        version: &str,
        schema: Value,
        template: &str,
    ) -> Result<(), SchemaError> {
        self.register_entry(SchemaEntry::new(name, version, schema, template))
    }

    /// Register a fully populated entry (examples, changelog).
    ///
    /// # Errors
    ///
    /// Same as [`register_schema`](Self::register_schema).
    pub fn register_entry(&mut self, entry: SchemaEntry) -> Result<(), SchemaError> {
        check_key(&entry.name, &entry.version)?;
        let versions = self.entries.entry(entry.name.clone()).or_default();
        let position = match versions
            .binary_search_by(|existing| compare_versions(&existing.version, &entry.version))
        {
            Ok(_) => {
                return Err(SchemaError::VersionExists {
                    name: entry.name,
                    version: entry.version,
                });
            }
            Err(position) => position,
        };
        tracing::debug!(name = %entry.name, version = %entry.version, "registered schema");
        versions.insert(position, entry);
        Ok(())
    }

    /// Register a caller-supplied schema after it passes
    /// [`validate_user_schema`].
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Unsafe` with the allow-list reasons, or any
    /// error from [`register_schema`](Self::register_schema).
    pub fn register_user_schema(
        &mut self,
        name: &str,
        version: &str,
        schema: Value,
        template: &str,
    ) -> Result<(), SchemaError> {
        let report = validate_user_schema(&schema);
        if !report.accepted {
            return Err(SchemaError::Unsafe {
                reasons: report.reasons,
            });
        }
        self.register_schema(name, version, schema, template)
    }

    #[must_use]
    pub fn get_schema(&self, name: &str, version: &str) -> Option<&SchemaEntry> {
        self.entries
            .get(name)?
            .iter()
            .find(|entry| entry.version == version)
    }

    /// Versions registered under `name`, ascending (`v2` before `v10`).
    #[must_use]
    pub fn get_versions(&self, name: &str) -> Vec<String> {
        self.entries
            .get(name)
            .map(|versions| versions.iter().map(|e| e.version.clone()).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn latest(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.get(name)?.last()
    }

    /// `version` if given, otherwise the latest.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` when nothing matches.
    pub fn resolve(&self, name: &str, version: Option<&str>) -> Result<&SchemaEntry, SchemaError> {
        let found = match version {
            Some(v) => self.get_schema(name, v),
            None => self.latest(name),
        };
        found.ok_or_else(|| SchemaError::NotFound {
            name: name.to_string(),
            version: version.unwrap_or("latest").to_string(),
        })
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Total number of (name, version) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate `instance` against a registered schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` for an unknown pair or
    /// `SchemaError::Compile` if the stored schema does not compile.
    pub fn validate(
        &self,
        name: &str,
        version: Option<&str>,
        instance: &Value,
    ) -> Result<ValidationResult, SchemaError> {
        let entry = self.resolve(name, version)?;
        let validator = SchemaValidator::new(&entry.schema)?;
        Ok(validator.validate(instance))
    }

    // -----------------------------------------------------------------------
    // Snapshot export / import
    // -----------------------------------------------------------------------

    /// Deep copy of every entry, ordered by name then version.
    #[must_use]
    pub fn export_registry(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            exported_at: Utc::now(),
            entries: self.entries.values().flatten().cloned().collect(),
        }
    }

    /// Replace the whole registry with `snapshot`. Returns the entry count.
    ///
    /// Every entry is checked before anything changes: keys must be
    /// non-empty and unique and schemas must be free of external references
    /// and compile. On error the registry is left untouched.
    ///
    /// # Errors
    ///
    /// `UnsupportedSnapshot`, `InvalidKey`, `VersionExists` (duplicate in the
    /// snapshot), or `Unsafe` naming the offending entry.
    pub fn import_registry(&mut self, snapshot: RegistrySnapshot) -> Result<usize, SchemaError> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SchemaError::UnsupportedSnapshot(snapshot.format_version));
        }

        let mut seen = BTreeSet::new();
        for entry in &snapshot.entries {
            check_key(&entry.name, &entry.version)?;
            if !seen.insert((entry.name.as_str(), entry.version.as_str())) {
                return Err(SchemaError::VersionExists {
                    name: entry.name.clone(),
                    version: entry.version.clone(),
                });
            }
            let report = check_import_hazards(&entry.schema);
            if !report.accepted {
                return Err(SchemaError::Unsafe {
                    reasons: report
                        .reasons
                        .into_iter()
                        .map(|reason| format!("{}@{}: {reason}", entry.name, entry.version))
                        .collect(),
                });
            }
        }

        let count = snapshot.entries.len();
        let mut entries: BTreeMap<String, Vec<SchemaEntry>> = BTreeMap::new();
        for entry in snapshot.entries {
            entries.entry(entry.name.clone()).or_default().push(entry);
        }
        for versions in entries.values_mut() {
            versions.sort_by(|a, b| compare_versions(&a.version, &b.version));
        }
        self.entries = entries;
        tracing::debug!(count, "imported schema registry snapshot");
        Ok(count)
    }
}

fn check_key(name: &str, version: &str) -> Result<(), SchemaError> {
    if name.trim().is_empty() {
        return Err(SchemaError::InvalidKey("schema name is empty".to_string()));
    }
    if version.trim().is_empty() {
        return Err(SchemaError::InvalidKey(format!(
            "version for schema '{name}' is empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let mut reg = SchemaRegistry::new();
        reg.register_schema("chat", "v1", json!({"type": "object"}), "{}")
            .unwrap();
        reg.register_schema(
            "chat",
            "v2",
            json!({"type": "object", "required": ["role"]}),
            "{\"role\": \"{{role}}\"}",
        )
        .unwrap();
        reg
    }

    #[test]
    fn register_and_get_returns_identical_content() {
        let mut reg = SchemaRegistry::new();
        reg.register_schema("test", "v1", json!({"type": "object"}), "template")
            .unwrap();
        let entry = reg.get_schema("test", "v1").unwrap();
        assert_eq!(entry.schema, json!({"type": "object"}));
        assert_eq!(entry.template, "template");
        assert!(reg.get_schema("test", "v2").is_none());
        assert!(reg.get_schema("other", "v1").is_none());
    }

    #[test]
    fn reregistering_a_version_is_rejected() {
        let mut reg = registry();
        let err = reg
            .register_schema("chat", "v1", json!({"type": "string"}), "x")
            .unwrap_err();
        assert!(matches!(err, SchemaError::VersionExists { .. }));
        assert_eq!(reg.get_schema("chat", "v1").unwrap().schema, json!({"type": "object"}));
    }

    #[test]
    fn empty_keys_are_rejected() {
        let mut reg = SchemaRegistry::new();
        assert!(matches!(
            reg.register_schema("", "v1", json!({}), ""),
            Err(SchemaError::InvalidKey(_))
        ));
        assert!(matches!(
            reg.register_schema("chat", " ", json!({}), ""),
            Err(SchemaError::InvalidKey(_))
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn versions_sort_naturally() {
        let mut reg = SchemaRegistry::new();
        for version in ["v10", "v2", "v1"] {
            reg.register_schema("code", version, json!({"type": "object"}), "{}")
                .unwrap();
        }
        assert_eq!(reg.get_versions("code"), vec!["v1", "v2", "v10"]);
        assert_eq!(reg.latest("code").unwrap().version, "v10");
        assert!(reg.get_versions("missing").is_empty());
    }

    #[test]
    fn list_and_len() {
        let mut reg = registry();
        reg.register_schema("analysis", "v1", json!({"type": "object"}), "{}")
            .unwrap();
        assert_eq!(reg.list(), vec!["analysis", "chat"]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn resolve_defaults_to_latest() {
        let reg = registry();
        assert_eq!(reg.resolve("chat", None).unwrap().version, "v2");
        assert_eq!(reg.resolve("chat", Some("v1")).unwrap().version, "v1");
        assert!(matches!(
            reg.resolve("chat", Some("v9")),
            Err(SchemaError::NotFound { .. })
        ));
    }

    #[test]
    fn validate_against_registered_schema() {
        let reg = registry();
        assert!(reg.validate("chat", None, &json!({"role": "a"})).unwrap().valid);
        assert!(!reg.validate("chat", None, &json!({})).unwrap().valid);
        assert!(reg.validate("chat", Some("v1"), &json!({})).unwrap().valid);
        assert!(reg.validate("nope", None, &json!({})).is_err());
    }

    #[test]
    fn user_schema_must_pass_allow_list() {
        let mut reg = SchemaRegistry::new();
        let err = reg
            .register_user_schema("custom", "v1", json!({"type": "object"}), "{}")
            .unwrap_err();
        assert!(matches!(err, SchemaError::Unsafe { .. }));
        reg.register_user_schema(
            "custom",
            "v1",
            json!({"$schema": "http://json-schema.org/draft-07/schema#", "type": "object"}),
            "{}",
        )
        .unwrap();
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn export_then_import_reproduces_registry() {
        let reg = registry();
        let snapshot = reg.export_registry();
        assert_eq!(snapshot.format_version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(snapshot.entries.len(), 2);

        let mut restored = SchemaRegistry::new();
        restored
            .register_schema("stale", "v1", json!({"type": "object"}), "{}")
            .unwrap();
        assert_eq!(restored.import_registry(snapshot).unwrap(), 2);
        assert_eq!(restored, reg);
        assert!(restored.get_schema("stale", "v1").is_none());
    }

    #[test]
    fn failed_import_leaves_registry_unchanged() {
        let mut reg = registry();
        let mut snapshot = reg.export_registry();
        snapshot.entries.push(SchemaEntry::new(
            "remote",
            "v1",
            json!({"$ref": "https://example.com/s.json"}),
            "{}",
        ));
        let err = reg.import_registry(snapshot).unwrap_err();
        assert!(matches!(err, SchemaError::Unsafe { .. }));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn import_rejects_duplicates_and_unknown_format() {
        let mut reg = registry();
        let mut snapshot = reg.export_registry();
        let dup = snapshot.entries[0].clone();
        snapshot.entries.push(dup);
        assert!(matches!(
            reg.import_registry(snapshot),
            Err(SchemaError::VersionExists { .. })
        ));

        let mut snapshot = reg.export_registry();
        snapshot.format_version = 99;
        assert!(matches!(
            reg.import_registry(snapshot),
            Err(SchemaError::UnsupportedSnapshot(99))
        ));
    }
}
