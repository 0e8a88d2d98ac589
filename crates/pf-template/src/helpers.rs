//! Named template helpers.
//!
//! A helper receives its resolved arguments in order. `None` stands for an
//! undefined value (a path that did not resolve); literals and resolved paths
//! arrive as `Some`.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::path::render_value;

/// Helper output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Plain text; JSON-escaped when the template is in JSON mode.
    Text(String),
    /// Inserted verbatim (already valid JSON or deliberately raw).
    Raw(String),
}

impl Rendered {
    /// Render a value the way variable interpolation would: strings as text,
    /// everything else as raw JSON.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Raw(other.to_string()),
        }
    }
}

/// A named template function.
pub trait Helper: Send + Sync {
    /// Produce output for `args`.
    ///
    /// # Errors
    ///
    /// Returns a message when the arguments are unusable.
    fn call(&self, args: &[Option<Value>]) -> Result<Rendered, String>;
}

impl<F> Helper for F
where
    F: Fn(&[Option<Value>]) -> Result<Rendered, String> + Send + Sync,
{
    fn call(&self, args: &[Option<Value>]) -> Result<Rendered, String> {
        self(args)
    }
}

fn arg(args: &[Option<Value>], index: usize) -> Option<&Value> {
    args.get(index).and_then(Option::as_ref)
}

/// `json value`: pretty-printed JSON with 2-space indent.
pub fn json(args: &[Option<Value>]) -> Result<Rendered, String> {
    let value = arg(args, 0).unwrap_or(&Value::Null);
    serde_json::to_string_pretty(value)
        .map(Rendered::Raw)
        .map_err(|e| e.to_string())
}

/// `default value fallback`: `value` unless it is undefined, null, or empty.
pub fn default(args: &[Option<Value>]) -> Result<Rendered, String> {
    let chosen = match arg(args, 0) {
        None | Some(Value::Null) => arg(args, 1),
        Some(Value::String(s)) if s.is_empty() => arg(args, 1),
        present => present,
    };
    Ok(chosen.map_or_else(|| Rendered::Text(String::new()), Rendered::from_value))
}

/// `join array [separator]`: elements joined with `separator` (`", "`).
pub fn join(args: &[Option<Value>]) -> Result<Rendered, String> {
    let separator = match arg(args, 1) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::from(", "),
    };
    let text = match arg(args, 0) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| render_value(item, false))
            .collect::<Vec<_>>()
            .join(&separator),
        Some(other) => render_value(other, false),
        None => String::new(),
    };
    Ok(Rendered::Text(text))
}

/// `capitalize text`: upper-cases the first character.
pub fn capitalize(args: &[Option<Value>]) -> Result<Rendered, String> {
    match arg(args, 0) {
        Some(Value::String(s)) => {
            let mut chars = s.chars();
            let text = chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            });
            Ok(Rendered::Text(text))
        }
        Some(other) => Ok(Rendered::from_value(other)),
        None => Ok(Rendered::Text(String::new())),
    }
}

/// `formatDate date [format]`: format an RFC 3339 timestamp or `YYYY-MM-DD`
/// date. The format accepts `YYYY MM DD HH mm ss` tokens or a chrono `%`
/// format string; default `YYYY-MM-DD`.
pub fn format_date(args: &[Option<Value>]) -> Result<Rendered, String> {
    let Some(Value::String(raw)) = arg(args, 0) else {
        return Err("expects a date string as first argument".to_string());
    };
    let timestamp = parse_date(raw).ok_or_else(|| format!("unrecognized date '{raw}'"))?;

    let format = match arg(args, 1) {
        Some(Value::String(f)) => f.as_str(),
        Some(_) => return Err("format must be a string".to_string()),
        None => "YYYY-MM-DD",
    };
    let chrono_format = if format.contains('%') {
        format.to_string()
    } else {
        translate_format(format)
    };

    let mut out = String::new();
    write!(out, "{}", timestamp.format(&chrono_format))
        .map_err(|_| format!("invalid date format '{format}'"))?;
    Ok(Rendered::Text(out))
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn translate_format(format: &str) -> String {
    format
        .replace("YYYY", "%Y")
        .replace("MM", "%m")
        .replace("DD", "%d")
        .replace("HH", "%H")
        .replace("mm", "%M")
        .replace("ss", "%S")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn some(v: Value) -> Option<Value> {
        Some(v)
    }

    #[test]
    fn json_is_pretty_two_space() {
        let out = json(&[some(json!({"a": [1]}))]).unwrap();
        assert_eq!(out, Rendered::Raw("{\n  \"a\": [\n    1\n  ]\n}".to_string()));
    }

    #[test]
    fn json_of_undefined_is_null() {
        assert_eq!(json(&[None]).unwrap(), Rendered::Raw("null".into()));
    }

    #[test]
    fn default_picks_fallback_for_missing_values() {
        assert_eq!(
            default(&[None, some(json!("neutral"))]).unwrap(),
            Rendered::Text("neutral".into())
        );
        assert_eq!(
            default(&[some(json!("")), some(json!(3))]).unwrap(),
            Rendered::Raw("3".into())
        );
        assert_eq!(
            default(&[some(json!("set")), some(json!("x"))]).unwrap(),
            Rendered::Text("set".into())
        );
    }

    #[test]
    fn join_defaults_to_comma_space() {
        assert_eq!(
            join(&[some(json!(["a", 1, true]))]).unwrap(),
            Rendered::Text("a, 1, true".into())
        );
        assert_eq!(
            join(&[some(json!(["a", "b"])), some(json!(" | "))]).unwrap(),
            Rendered::Text("a | b".into())
        );
        assert_eq!(join(&[None]).unwrap(), Rendered::Text(String::new()));
    }

    #[test]
    fn capitalize_first_char() {
        assert_eq!(
            capitalize(&[some(json!("élan vital"))]).unwrap(),
            Rendered::Text("Élan vital".into())
        );
        assert_eq!(capitalize(&[None]).unwrap(), Rendered::Text(String::new()));
    }

    #[test]
    fn format_date_tokens_and_chrono() {
        assert_eq!(
            format_date(&[some(json!("2026-03-04T05:06:07Z")), some(json!("DD/MM/YYYY HH:mm:ss"))])
                .unwrap(),
            Rendered::Text("04/03/2026 05:06:07".into())
        );
        assert_eq!(
            format_date(&[some(json!("2026-03-04"))]).unwrap(),
            Rendered::Text("2026-03-04".into())
        );
        assert_eq!(
            format_date(&[some(json!("2026-03-04")), some(json!("%B %-d"))]).unwrap(),
            Rendered::Text("March 4".into())
        );
    }

    #[test]
    fn format_date_rejects_garbage() {
        assert!(format_date(&[some(json!("yesterday"))]).is_err());
        assert!(format_date(&[None]).is_err());
    }
}
