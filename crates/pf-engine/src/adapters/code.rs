//! Code generation prompts.

use pf_core::Domain;
use serde_json::json;

use super::{DomainAdapter, object};

const TEMPLATE: &str = r#"{
  "role": "{{role}}",
  "language": "{{capitalize language}}",
  "task": "{{task_description}}",
  "requirements": {{json constraints}},
  "notes": "{{join constraints "; "}}",
  "style": "{{style}}",
  "include_tests": {{json include_tests}}
}"#;

pub(super) fn adapter() -> DomainAdapter {
    DomainAdapter {
        domain: Domain::Code,
        description: "Prompts for writing or changing code".to_string(),
        required_fields: vec!["task_description".to_string(), "language".to_string()],
        defaults: object(json!({
            "role": "Senior software engineer",
            "style": "idiomatic",
            "include_tests": true
        })),
        schema: json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Code prompt",
            "type": "object",
            "required": ["role", "language", "task", "requirements"],
            "properties": {
                "role": {"type": "string", "minLength": 1},
                "language": {"type": "string", "minLength": 1},
                "task": {"type": "string", "minLength": 1},
                "requirements": {"type": "array", "items": {"type": "string"}},
                "notes": {"type": "string"},
                "style": {
                    "type": "string",
                    "enum": ["idiomatic", "minimal", "verbose"],
                    "default": "idiomatic"
                },
                "include_tests": {"type": "boolean", "default": true}
            }
        }),
        template: TEMPLATE.to_string(),
        examples: vec![json!({
            "role": "Senior software engineer",
            "language": "Rust",
            "task": "Parse a CSV file into typed records",
            "requirements": ["No unwrap in library code"],
            "style": "idiomatic",
            "include_tests": true
        })],
        system_instruction: "You write precise prompts for code generation. \
            State the language, the task, concrete requirements, and whether tests are expected."
            .to_string(),
    }
}
