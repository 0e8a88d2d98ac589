//! Image generation prompts.

use pf_core::Domain;
use serde_json::json;

use super::{DomainAdapter, object};

const TEMPLATE: &str = r#"{
  "subject": "{{task_description}}",
  "style": "{{style}}",
  "aspect_ratio": "{{aspect_ratio}}",
  "quality": "{{quality}}",
  "details": {{json constraints}}
}"#;

pub(super) fn adapter() -> DomainAdapter {
    DomainAdapter {
        domain: Domain::Image,
        description: "Prompts for text-to-image models".to_string(),
        required_fields: vec!["task_description".to_string()],
        defaults: object(json!({
            "style": "photorealistic",
            "aspect_ratio": "1:1",
            "quality": "standard"
        })),
        schema: json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Image prompt",
            "type": "object",
            "required": ["subject", "style", "aspect_ratio"],
            "properties": {
                "subject": {"type": "string", "minLength": 1},
                "style": {
                    "type": "string",
                    "enum": ["photorealistic", "illustration", "3d-render", "watercolor", "pixel-art"]
                },
                "aspect_ratio": {"type": "string", "pattern": "^[0-9]+:[0-9]+$"},
                "quality": {"type": "string", "enum": ["draft", "standard", "hd"]},
                "negative_prompt": {"type": "string"},
                "details": {"type": "array", "items": {"type": "string"}, "maxItems": 20}
            }
        }),
        template: TEMPLATE.to_string(),
        examples: vec![json!({
            "subject": "A lighthouse at dusk",
            "style": "watercolor",
            "aspect_ratio": "16:9",
            "quality": "hd",
            "details": ["warm light", "calm sea"]
        })],
        system_instruction: "You write prompts for text-to-image models. \
            Describe the subject, visual style, aspect ratio, and notable details."
            .to_string(),
    }
}
