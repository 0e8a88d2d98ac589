//! Data and document analysis prompts.

use pf_core::Domain;
use serde_json::json;

use super::{DomainAdapter, object};

const TEMPLATE: &str = r#"{
  "role": "{{role}}",
  "objective": "{{task_description}}",
  "questions": [{{json task_description}}],
  "depth": "{{depth}}",
  "as_of": "{{formatDate today}}",
  {{#if has_constraints}}"constraints": {{json constraints}},
  {{/if}}"output_format": "{{output_format}}"
}"#;

pub(super) fn adapter() -> DomainAdapter {
    DomainAdapter {
        domain: Domain::Analysis,
        description: "Prompts for analysing data or documents".to_string(),
        required_fields: vec!["task_description".to_string()],
        defaults: object(json!({
            "role": "Data analyst",
            "depth": "standard",
            "output_format": "markdown"
        })),
        schema: json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Analysis prompt",
            "type": "object",
            "required": ["role", "objective", "questions", "depth"],
            "properties": {
                "role": {"type": "string", "minLength": 1},
                "objective": {"type": "string", "minLength": 1},
                "questions": {"type": "array", "items": {"type": "string"}, "minItems": 1},
                "depth": {
                    "type": "string",
                    "enum": ["brief", "standard", "deep"],
                    "default": "standard"
                },
                "as_of": {"type": "string", "format": "date"},
                "constraints": {"type": "array", "items": {"type": "string"}},
                "output_format": {"type": "string", "enum": ["text", "markdown", "json"]}
            }
        }),
        template: TEMPLATE.to_string(),
        examples: vec![json!({
            "role": "Data analyst",
            "objective": "Explain the drop in weekly signups",
            "questions": ["Which channels declined?", "Did pricing change?"],
            "depth": "deep",
            "as_of": "2026-01-15",
            "output_format": "markdown"
        })],
        system_instruction: "You write prompts for analytical tasks. \
            State the objective, the questions to answer, the expected depth, and the output format."
            .to_string(),
    }
}
