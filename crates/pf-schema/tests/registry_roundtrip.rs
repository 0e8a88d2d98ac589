//! Registry snapshots survive serialization, and repaired documents validate
//! against the registered schema.

use pf_schema::{RegistrySnapshot, SchemaEntry, SchemaRegistry, repair, validate};
use pretty_assertions::assert_eq;
use serde_json::{Map, json};

fn populated() -> SchemaRegistry {
    let mut reg = SchemaRegistry::new();
    reg.register_entry(
        SchemaEntry::new(
            "chat",
            "v1",
            json!({
                "$schema": "http://json-schema.org/draft-07/schema#",
                "type": "object",
                "required": ["role"],
                "properties": {"role": {"type": "string"}}
            }),
            "{\"role\": \"{{role}}\"}",
        )
        .with_examples(vec![json!({"role": "Assistant"})])
        .with_changelog("initial"),
    )
    .unwrap();
    reg.register_schema(
        "chat",
        "v2",
        json!({
            "type": "object",
            "required": ["role", "goals"],
            "properties": {
                "role": {"type": "string"},
                "goals": {"type": "array", "items": {"type": "string"}}
            }
        }),
        "{\"role\": \"{{role}}\", \"goals\": {{json goals}}}",
    )
    .unwrap();
    reg.register_schema("image", "v1", json!({"type": "object"}), "{}")
        .unwrap();
    reg
}

#[test]
fn snapshot_survives_json_serialization() {
    let reg = populated();
    let text = serde_json::to_string_pretty(&reg.export_registry()).unwrap();
    let snapshot: RegistrySnapshot = serde_json::from_str(&text).unwrap();

    let mut restored = SchemaRegistry::new();
    assert_eq!(restored.import_registry(snapshot).unwrap(), 3);
    assert_eq!(restored, reg);
    for name in reg.list() {
        for version in reg.get_versions(name) {
            assert_eq!(
                restored.get_schema(name, &version),
                reg.get_schema(name, &version)
            );
        }
    }
}

#[test]
fn snapshot_without_optional_fields_deserializes() {
    let text = r#"{
        "format_version": 1,
        "exported_at": "2026-01-01T00:00:00Z",
        "entries": [{
            "name": "code",
            "version": "v1",
            "schema": {"type": "object"},
            "template": "{}",
            "registered_at": "2026-01-01T00:00:00Z"
        }]
    }"#;
    let snapshot: RegistrySnapshot = serde_json::from_str(text).unwrap();
    let mut reg = SchemaRegistry::new();
    reg.import_registry(snapshot).unwrap();
    let entry = reg.get_schema("code", "v1").unwrap();
    assert!(entry.examples.is_empty());
    assert_eq!(entry.changelog, None);
}

#[test]
fn repaired_document_validates_against_registered_schema() {
    let reg = populated();
    let entry = reg.latest("chat").unwrap();
    let mut defaults = Map::new();
    defaults.insert("role".into(), json!("Assistant"));

    let outcome = repair(json!({"goals": "Help"}), &entry.schema, &defaults, 3);
    assert!(outcome.validation.valid);
    assert_eq!(outcome.document, json!({"goals": ["Help"], "role": "Assistant"}));
    assert_eq!(validate(&outcome.document, &entry.schema), outcome.validation);
}
