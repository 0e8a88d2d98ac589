//! Input hashing for provenance.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Hex SHA-256 of the canonical JSON encoding of `input`.
///
/// Object keys are emitted in sorted order, so two inputs that differ only in
/// key order hash identically.
#[must_use]
pub fn input_hash(input: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical(input).to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Rebuild `value` with every object's keys inserted in sorted order.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonical(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_is_hex_sha256() {
        let hash = input_hash(&json!({"domain": "chat"}));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_ignores_key_order() {
        let a: Value =
            serde_json::from_str(r#"{"domain":"chat","task_description":"x"}"#).unwrap();
        let b: Value =
            serde_json::from_str(r#"{"task_description":"x","domain":"chat"}"#).unwrap();
        assert_eq!(input_hash(&a), input_hash(&b));
    }

    #[test]
    fn hash_differs_for_different_input() {
        assert_ne!(
            input_hash(&json!({"domain": "chat"})),
            input_hash(&json!({"domain": "code"}))
        );
    }
}
