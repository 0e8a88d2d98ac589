//! Conversational assistant prompts.

use pf_core::Domain;
use serde_json::json;

use super::{DomainAdapter, object};

const TEMPLATE: &str = r#"{
  "role": "{{role}}",
  "goals": [{{json task_description}}],
  "tone": "{{tone}}",
  "audience": "{{default audience "general"}}",
  {{#if has_constraints}}"constraints": {{json constraints}},
  {{/if}}"output_format": "{{output_format}}"
}"#;

pub(super) fn adapter() -> DomainAdapter {
    DomainAdapter {
        domain: Domain::Chat,
        description: "System prompts for conversational assistants".to_string(),
        required_fields: vec!["task_description".to_string()],
        defaults: object(json!({
            "role": "Assistant",
            "tone": "neutral",
            "output_format": "markdown"
        })),
        schema: json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Chat prompt",
            "type": "object",
            "required": ["role", "goals", "tone"],
            "properties": {
                "role": {"type": "string", "minLength": 1},
                "goals": {
                    "type": "array",
                    "items": {"type": "string", "minLength": 1},
                    "minItems": 1,
                    "uniqueItems": true
                },
                "tone": {
                    "type": "string",
                    "enum": ["neutral", "friendly", "formal", "playful"],
                    "default": "neutral"
                },
                "audience": {"type": "string"},
                "constraints": {"type": "array", "items": {"type": "string"}},
                "output_format": {"type": "string", "enum": ["text", "markdown", "json"]}
            }
        }),
        template: TEMPLATE.to_string(),
        examples: vec![json!({
            "role": "Support agent",
            "goals": ["Resolve billing questions"],
            "tone": "friendly",
            "audience": "customers",
            "constraints": ["Never share account numbers"],
            "output_format": "text"
        })],
        system_instruction: "You design system prompts for conversational assistants. \
            Describe the assistant's role, its goals, tone, audience, and any constraints."
            .to_string(),
    }
}
