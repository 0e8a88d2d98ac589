//! Dotted-path navigation and value rendering.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// A variable reference: identifier segments separated by dots.
pub static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][\w$-]*(?:\.[\w$-]+)*$").expect("path regex should compile")
});

/// Walk `path` through objects (by key) and arrays (by index).
///
/// Any missing segment yields `None`.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// First segment of a dotted path.
pub fn root_of(path: &str) -> &str {
    path.split('.').next().unwrap_or(path)
}

/// Text form of a value: strings raw, everything else compact JSON.
///
/// In JSON mode strings are JSON-escaped (without surrounding quotes) so they
/// can sit inside a quoted JSON string in the template.
pub fn render_value(value: &Value, json_mode: bool) -> String {
    match value {
        Value::String(s) if json_mode => escape_json(s),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON-escape `text` without the surrounding quotes.
pub fn escape_json(text: &str) -> String {
    let quoted = Value::String(text.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

/// Boolean-ish truthiness: everything except `null`, `false`, `0`, `""`,
/// `[]`, `{}` and undefined is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}
