//! Safety allow-list for caller-supplied schemas.
//!
//! External `$ref` targets are refused outright so that validation never
//! triggers a network or filesystem fetch.

use serde::Serialize;
use serde_json::Value;

/// Maximum object/array nesting accepted in a caller-supplied schema.
pub const MAX_SCHEMA_DEPTH: usize = 64;

const DRAFT_MARKERS: [&str; 5] = ["draft-04", "draft-06", "draft-07", "2019-09", "2020-12"];
const REFERENCE_KEYWORDS: [&str; 3] = ["$ref", "$dynamicRef", "$recursiveRef"];

/// Outcome of [`validate_user_schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaSafetyReport {
    pub accepted: bool,
    pub reasons: Vec<String>,
}

/// Check a caller-supplied schema against the allow-list. Never errors.
///
/// Requirements:
/// - the schema is a JSON object
/// - `$schema` names json-schema.org or a recognizable draft
/// - the root declares `type`
/// - every reference is a local fragment (`#...`)
/// - nesting stays within [`MAX_SCHEMA_DEPTH`]
/// - the schema compiles
#[must_use]
pub fn validate_user_schema(schema: &Value) -> SchemaSafetyReport {
    let Some(root) = schema.as_object() else {
        return SchemaSafetyReport {
            accepted: false,
            reasons: vec!["schema must be a JSON object".to_string()],
        };
    };

    let mut reasons = Vec::new();
    match root.get("$schema") {
        Some(Value::String(uri)) if is_draft_marker(uri) => {}
        Some(Value::String(uri)) => {
            reasons.push(format!("$schema '{uri}' does not name a known JSON Schema draft"));
        }
        Some(_) => reasons.push("$schema must be a string".to_string()),
        None => reasons.push("missing $schema draft marker".to_string()),
    }
    if !root.contains_key("type") {
        reasons.push("root schema must declare `type`".to_string());
    }

    reasons.extend(scan_hazards(schema));
    finish(schema, reasons)
}

/// The subset of checks applied on registry import: reference and depth
/// hazards plus compilation, without the `$schema`/`type` requirements.
#[must_use]
pub fn check_import_hazards(schema: &Value) -> SchemaSafetyReport {
    finish(schema, scan_hazards(schema))
}

fn finish(schema: &Value, mut reasons: Vec<String>) -> SchemaSafetyReport {
    // Only compile once nothing dangerous was found.
    if reasons.is_empty()
        && let Err(error) = jsonschema::validator_for(schema)
    {
        reasons.push(format!("schema does not compile: {error}"));
    }
    SchemaSafetyReport {
        accepted: reasons.is_empty(),
        reasons,
    }
}

fn is_draft_marker(uri: &str) -> bool {
    uri.contains("json-schema.org") || DRAFT_MARKERS.iter().any(|marker| uri.contains(marker))
}

/// External references and excessive nesting, as human-readable reasons.
fn scan_hazards(schema: &Value) -> Vec<String> {
    let mut reasons = Vec::new();
    walk(schema, 0, "", &mut reasons);
    reasons
}

fn walk(node: &Value, depth: usize, pointer: &str, reasons: &mut Vec<String>) {
    if depth > MAX_SCHEMA_DEPTH {
        reasons.push(format!(
            "schema nesting exceeds {MAX_SCHEMA_DEPTH} levels at '{pointer}'"
        ));
        return;
    }
    match node {
        Value::Object(map) => {
            for keyword in REFERENCE_KEYWORDS {
                if let Some(target) = map.get(keyword) {
                    match target.as_str() {
                        Some(reference) if reference.starts_with('#') => {}
                        Some(reference) => reasons.push(format!(
                            "external reference {keyword} '{reference}' at '{pointer}' is not allowed"
                        )),
                        None => reasons.push(format!("{keyword} at '{pointer}' must be a string")),
                    }
                }
            }
            for (key, child) in map {
                let child_pointer = format!("{pointer}/{}", key.replace('~', "~0").replace('/', "~1"));
                walk(child, depth + 1, &child_pointer, reasons);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(child, depth + 1, &format!("{pointer}/{index}"), reasons);
            }
        }
        _ => {}
    }
}
