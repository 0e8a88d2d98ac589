//! Bounded auto-repair of documents that fail schema validation.
//!
//! Each pass walks the schema alongside the document and applies a fixed set
//! of conservative fixes. The loop stops once the document validates, once
//! a pass changes nothing, or after `max_attempts` passes.

use pf_core::ValidationResult;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::validator::{SchemaValidator, validate};

/// Upper bound on `$ref` hops followed while walking one node.
const MAX_REF_HOPS: usize = 32;

/// Result of [`repair`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairOutcome {
    pub document: Value,
    pub validation: ValidationResult,
    /// Repair passes executed; `0` when the input was already valid.
    pub attempts: u32,
}

/// Validate `document` and, if it fails, run up to `max_attempts` repair
/// passes.
///
/// Fixes applied per pass:
/// - missing required properties are filled from `defaults` (root object
///   only) or the property schema's `default`
/// - a non-array where an array is expected becomes a one-element array
/// - numbers and booleans become strings where a string is expected
/// - numeric strings become numbers/integers, `"true"`/`"false"` booleans
/// - enum strings are matched case-insensitively
/// - arrays are truncated to `maxItems` and deduplicated under `uniqueItems`
///
/// The returned validation always reflects the final document.
#[must_use]
pub fn repair(
    document: Value,
    schema: &Value,
    defaults: &Map<String, Value>,
    max_attempts: u32,
) -> RepairOutcome {
    let Ok(validator) = SchemaValidator::new(schema) else {
        return RepairOutcome {
            validation: validate(&document, schema),
            document,
            attempts: 0,
        };
    };

    let mut document = document;
    let mut validation = validator.validate(&document);
    let mut attempts = 0;
    while !validation.valid && attempts < max_attempts {
        attempts += 1;
        let changed = repair_node(&mut document, schema, schema, Some(defaults));
        if !changed {
            tracing::debug!(attempts, "repair pass made no progress");
            break;
        }
        validation = validator.validate(&document);
    }

    if !validation.valid {
        tracing::warn!(
            attempts,
            remaining = validation.errors.len(),
            "document still invalid after repair"
        );
    }
    RepairOutcome {
        document,
        validation,
        attempts,
    }
}

/// Apply every fix that `schema` allows to `node` and its children.
/// Returns whether anything changed.
fn repair_node(
    node: &mut Value,
    schema: &Value,
    root: &Value,
    defaults: Option<&Map<String, Value>>,
) -> bool {
    let schema = follow_refs(schema, root);
    let Some(rules) = schema.as_object() else {
        return false;
    };

    let mut changed = coerce_type(node, rules.get("type"));
    changed |= match_enum(node, rules.get("enum"));

    match node {
        Value::Object(object) => {
            changed |= fill_required(object, rules, defaults);
            if let Some(Value::Object(properties)) = rules.get("properties") {
                for (key, child_schema) in properties {
                    if let Some(child) = object.get_mut(key) {
                        changed |= repair_node(child, child_schema, root, None);
                    }
                }
            }
        }
        Value::Array(items) => {
            if rules.get("uniqueItems") == Some(&Value::Bool(true)) {
                changed |= dedupe(items);
            }
            if let Some(max) = rules.get("maxItems").and_then(Value::as_u64)
                && let Ok(max) = usize::try_from(max)
                && items.len() > max
            {
                items.truncate(max);
                changed = true;
            }
            match rules.get("items") {
                Some(item_schema @ Value::Object(_)) => {
                    for item in items.iter_mut() {
                        changed |= repair_node(item, item_schema, root, None);
                    }
                }
                Some(Value::Array(tuple)) => {
                    for (item, item_schema) in items.iter_mut().zip(tuple) {
                        changed |= repair_node(item, item_schema, root, None);
                    }
                }
                _ => {}
            }
        }
        _ => {}
    }

    if let Some(Value::Array(all_of)) = rules.get("allOf") {
        for sub in all_of {
            changed |= repair_node(node, sub, root, defaults);
        }
    }
    changed
}

/// Resolve local `$ref` pointers (`#/...`) against the root schema.
fn follow_refs<'a>(mut schema: &'a Value, root: &'a Value) -> &'a Value {
    for _ in 0..MAX_REF_HOPS {
        let Some(pointer) = schema
            .get("$ref")
            .and_then(Value::as_str)
            .and_then(|r| r.strip_prefix('#'))
        else {
            break;
        };
        match root.pointer(pointer) {
            Some(target) => schema = target,
            None => break,
        }
    }
    schema
}

fn fill_required(
    object: &mut Map<String, Value>,
    rules: &Map<String, Value>,
    defaults: Option<&Map<String, Value>>,
) -> bool {
    let Some(Value::Array(required)) = rules.get("required") else {
        return false;
    };
    let mut changed = false;
    for key in required.iter().filter_map(Value::as_str) {
        if object.contains_key(key) {
            continue;
        }
        let fallback = defaults
            .and_then(|d| d.get(key))
            .or_else(|| rules.get("properties")?.get(key)?.get("default"));
        if let Some(value) = fallback {
            object.insert(key.to_string(), value.clone());
            changed = true;
        }
    }
    changed
}

fn coerce_type(node: &mut Value, declared: Option<&Value>) -> bool {
    let targets: Vec<&str> = match declared {
        Some(Value::String(ty)) => vec![ty.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => return false,
    };
    if targets.iter().any(|ty| matches_type(node, ty)) {
        return false;
    }
    for target in targets {
        if let Some(coerced) = coerce(node, target) {
            *node = coerced;
            return true;
        }
    }
    false
}

fn matches_type(value: &Value, ty: &str) -> bool {
    match ty {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|f| f.fract() == 0.0),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn coerce(value: &Value, target: &str) -> Option<Value> {
    match (target, value) {
        ("array", Value::Null | Value::Array(_)) => None,
        ("array", other) => Some(Value::Array(vec![other.clone()])),
        ("string", Value::Number(n)) => Some(Value::String(n.to_string())),
        ("string", Value::Bool(b)) => Some(Value::String(b.to_string())),
        ("integer", Value::String(s)) => parse_integer(s.trim()),
        ("number", Value::String(s)) => {
            let s = s.trim();
            parse_integer(s).or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            })
        }
        ("boolean", Value::String(s)) => match s.trim() {
            t if t.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
            f if f.eq_ignore_ascii_case("false") => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_integer(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        return Some(Value::from(f as i64));
    }
    None
}

fn match_enum(node: &mut Value, allowed: Option<&Value>) -> bool {
    let (Some(Value::Array(allowed)), Value::String(current)) = (allowed, &*node) else {
        return false;
    };
    if allowed.iter().any(|v| v.as_str() == Some(current)) {
        return false;
    }
    let replacement = allowed
        .iter()
        .filter_map(Value::as_str)
        .find(|candidate| candidate.eq_ignore_ascii_case(current))
        .map(str::to_string);
    match replacement {
        Some(candidate) => {
            *node = Value::String(candidate);
            true
        }
        None => false,
    }
}

/// Drop later duplicates, keeping first occurrences in order.
fn dedupe(items: &mut Vec<Value>) -> bool {
    let before = items.len();
    let mut kept: Vec<Value> = Vec::with_capacity(before);
    for item in items.drain(..) {
        if !kept.contains(&item) {
            kept.push(item);
        }
    }
    *items = kept;
    items.len() != before
}
