//! Template-injection sanitization for caller-supplied values.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static TEMPLATE_SYNTAX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").expect("sanitize regex should compile"));

/// Remove every `{{...}}` sequence from `text`, repeating until none remain
/// (so `{{{{x}}}}`-style nesting cannot reassemble a tag).
#[must_use]
pub fn strip_template_syntax(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = TEMPLATE_SYNTAX_RE.replace_all(&current, "").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Apply [`strip_template_syntax`] to every string inside `value`.
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(strip_template_syntax(s)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), sanitize_value(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}
