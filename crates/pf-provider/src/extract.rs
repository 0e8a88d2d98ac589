//! Pull a JSON document out of LLM completion text.

use serde_json::Value;

use crate::error::ProviderError;

/// Longest completion excerpt carried in a [`ProviderError::NonJson`].
const EXCERPT_CHARS: usize = 200;

/// Parse the JSON document in `text`, tolerating Markdown code fences
/// (```` ```json ... ``` ````) and prose around a single object or array.
///
/// # Errors
///
/// Returns [`ProviderError::NonJson`] with an excerpt of the text when no
/// JSON document can be recovered.
pub fn extract_json(text: &str) -> Result<Value, ProviderError> {
    let unfenced = strip_fences(text);
    if let Ok(value) = serde_json::from_str(unfenced) {
        return Ok(value);
    }

    // Prose before or after the document: take the outermost braces.
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (unfenced.find(open), unfenced.rfind(close))
            && end > start
            && let Ok(value) = serde_json::from_str(&unfenced[start..=end])
        {
            return Ok(value);
        }
    }

    Err(ProviderError::NonJson(excerpt(text)))
}

fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (`json`, `JSON`, ...) up to the first newline.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().trim_end_matches("```").trim()
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn plain_json() {
        assert_eq!(extract_json(r#"{"role":"a"}"#).unwrap(), json!({"role": "a"}));
    }

    #[test]
    fn fenced_json() {
        let text = "```json\n{\"role\": \"a\", \"goals\": [\"b\"]}\n```";
        assert_eq!(
            extract_json(text).unwrap(),
            json!({"role": "a", "goals": ["b"]})
        );
    }

    #[test]
    fn bare_fence_and_uppercase_tag() {
        assert_eq!(extract_json("```\n[1, 2]\n```").unwrap(), json!([1, 2]));
        assert_eq!(extract_json("```JSON\n{\"a\": 1}\n```").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn prose_around_document() {
        let text = "Here is your prompt:\n{\"role\": \"a\"}\nLet me know!";
        assert_eq!(extract_json(text).unwrap(), json!({"role": "a"}));
    }

    #[test]
    fn non_json_is_an_error() {
        let err = extract_json("I cannot help with that.").unwrap_err();
        assert!(matches!(err, ProviderError::NonJson(ref t) if t == "I cannot help with that."));
    }

    #[test]
    fn long_text_is_excerpted() {
        let err = extract_json(&"x".repeat(500)).unwrap_err();
        let ProviderError::NonJson(text) = err else {
            panic!("expected NonJson");
        };
        assert_eq!(text.len(), EXCERPT_CHARS + 3);
    }
}
