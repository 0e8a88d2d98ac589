//! Rendering properties that hold across templates and contexts.

use pf_template::{TemplateContext, TemplateEngine, TemplateError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("Plain {{name}} text")]
#[case("{{a.b.c}} and {{ spaced }}")]
#[case(r#"{"role": "{{role}}", "tone": "{{tone}}"}"#)]
#[case("[\"{{first}}\", \"{{second.0}}\"]")]
fn unresolved_tags_survive_rendering(#[case] template: &str) {
    let engine = TemplateEngine::new();
    let out = engine.compile(template, &TemplateContext::new()).unwrap();
    assert_eq!(out, template);

    // Rendering again changes nothing.
    let again = engine.compile(&out, &TemplateContext::new()).unwrap();
    assert_eq!(again, out);
}

#[test]
fn full_prompt_template_renders() {
    let template = r#"{
  "role": "{{capitalize role}}",
  "task": "{{task_description}}",
  "goals": {{json goals}},
  "tone": "{{default tone "neutral"}}"{{#if has_constraints}},
  "constraints": {{json constraints}}{{/if}}
}"#;
    let ctx = TemplateContext::new()
        .with_default("role", "assistant")
        .with_default("goals", json!([]))
        .with_variable("task_description", "Review \"unsafe\" blocks")
        .with_variable("goals", json!(["Find bugs"]))
        .with_variable("constraints", json!(["Be concise"]))
        .with_conditional("has_constraints", true);

    let value = TemplateEngine::new().render_value(template, &ctx).unwrap();
    assert_eq!(
        value,
        json!({
            "role": "Assistant",
            "task": "Review \"unsafe\" blocks",
            "goals": ["Find bugs"],
            "tone": "neutral",
            "constraints": ["Be concise"]
        })
    );
}

#[test]
fn disabled_block_is_dropped_cleanly() {
    let template = r#"{"a": 1{{#if extra}}, "b": 2{{/if}}}"#;
    let ctx = TemplateContext::new().with_conditional("extra", false);
    let value = TemplateEngine::new().render_value(template, &ctx).unwrap();
    assert_eq!(value, json!({"a": 1}));
}

#[test]
fn template_text_itself_is_not_sanitized() {
    // Only values are stripped; tags in the template remain active.
    let ctx = TemplateContext::new().with_variable("x", "ok");
    let out = TemplateEngine::new().compile("{{x}}-{{x}}", &ctx).unwrap();
    assert_eq!(out, "ok-ok");
}

#[test]
fn helper_errors_surface_with_helper_name() {
    let ctx = TemplateContext::new().with_variable("when", 12);
    let err = TemplateEngine::new()
        .compile("{{formatDate when}}", &ctx)
        .unwrap_err();
    assert!(err.to_string().contains("formatDate"));
    assert!(matches!(err, TemplateError::Helper { .. }));
}

#[rstest]
#[case(r#"Items: {{join parts ""}}"#, json!(["{", "{secret}}"]), json!(", "))]
#[case("{{join parts sep}}", json!(["a", "secret}}"]), json!("{{"))]
#[case("{{{join parts sep}}", json!(["", "secret}}"]), json!("{"))]
fn helper_output_cannot_assemble_new_tags(
    #[case] template: &str,
    #[case] parts: serde_json::Value,
    #[case] sep: serde_json::Value,
) {
    let ctx = TemplateContext::new()
        .with_variable("parts", parts)
        .with_variable("sep", sep)
        .with_variable("secret", "LEAKED");
    let out = TemplateEngine::new().compile(template, &ctx).unwrap();
    assert!(!out.contains("LEAKED"), "{out}");
}

#[test]
fn helper_and_variable_tags_resolve_in_one_pass() {
    let ctx = TemplateContext::new()
        .with_variable("name", "ada")
        .with_variable("tags", json!(["x", "y"]));
    let out = TemplateEngine::new()
        .compile("{{capitalize name}} {{name}} [{{join tags \"|\"}}]", &ctx)
        .unwrap();
    assert_eq!(out, "Ada ada [x|y]");
}
