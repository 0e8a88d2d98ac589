//! End-to-end generation through the public API.

use pf_config::GenerationConfig;
use pf_core::{Domain, FileStore, History};
use pf_engine::adapters::DomainAdapter;
use pf_engine::{AdapterTable, Engine, EngineError, PromptInput};
use pretty_assertions::assert_eq;
use serde_json::{Map, json};

fn engine() -> Engine {
    Engine::new(GenerationConfig::default()).expect("engine builds")
}

#[test]
fn chat_scenario() {
    let mut history = History::default();
    let input = PromptInput::new("chat", "Create a helpful coding assistant")
        .with_constraint("Be concise");
    let out = engine().generate_prompt(&input, &mut history).unwrap();

    assert!(out.validation.valid);
    assert!(out.validation.errors.is_empty());
    let prompt = out.prompt.as_object().unwrap();
    assert!(prompt.contains_key("role"));
    assert!(prompt.contains_key("goals"));
}

#[test]
fn unknown_domain_scenario() {
    let err = engine()
        .generate_prompt(&PromptInput::new("unknown", "x"), &mut History::default())
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownDomain(ref name) if name == "unknown"));
    assert!(err.to_string().contains("unknown"));
}

#[test]
fn every_builtin_domain_generates_a_valid_prompt() {
    let engine = engine();
    let mut history = History::default();
    for domain in Domain::BUILTIN {
        let input = PromptInput::new(domain.as_str(), "Summarise quarterly results")
            .with_constraint("Cite sources")
            .with_variable("language", "python");
        let out = engine.generate_prompt(&input, &mut history).unwrap();
        assert!(out.validation.valid, "{domain}: {:?}", out.validation.errors);
        assert_eq!(out.domain, domain.as_str());
    }
    assert_eq!(history.len(), 4);
}

#[test]
fn history_is_capped_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    let engine = engine();
    let mut history = History::new(3);

    for i in 0..5 {
        let input = PromptInput::new("chat", format!("Task {i}"));
        engine.generate_prompt(&input, &mut history).unwrap();
    }
    assert_eq!(history.len(), 3);
    assert_eq!(
        history.latest().unwrap().prompt["goals"],
        json!(["Task 4"])
    );

    history.save(&mut store).unwrap();
    let reloaded = History::load(&store, 3).unwrap();
    assert_eq!(reloaded, history);
}

#[test]
fn plugin_domain_end_to_end() {
    let mut table = AdapterTable::builtin();
    let mut defaults = Map::new();
    defaults.insert("greeting".into(), json!("Hello"));
    table
        .register_plugin(
            "email",
            DomainAdapter {
                domain: Domain::Chat,
                description: "Email drafts".into(),
                required_fields: vec!["task_description".into(), "recipient".into()],
                defaults,
                schema: json!({
                    "$schema": "http://json-schema.org/draft-07/schema#",
                    "type": "object",
                    "required": ["to", "subject", "opening"],
                    "properties": {
                        "to": {"type": "string"},
                        "subject": {"type": "string"},
                        "opening": {"type": "string"}
                    }
                }),
                template: r#"{"to": "{{recipient}}", "subject": "{{task_description}}", "opening": "{{greeting}} {{recipient}},"}"#
                    .into(),
                examples: vec![],
                system_instruction: "Write an email.".into(),
            },
        )
        .unwrap();
    let engine = Engine::with_adapters(table, GenerationConfig::default()).unwrap();
    let mut history = History::default();

    let missing = engine
        .generate_prompt(&PromptInput::new("email", "Quarterly update"), &mut history)
        .unwrap_err();
    assert!(matches!(missing, EngineError::InvalidRequest(_)));

    let input = PromptInput::new("email", "Quarterly update").with_variable("recipient", "Ada");
    let out = engine.generate_prompt(&input, &mut history).unwrap();
    assert!(out.validation.valid);
    assert_eq!(
        out.prompt,
        json!({"to": "Ada", "subject": "Quarterly update", "opening": "Hello Ada,"})
    );
    assert_eq!(engine.registry().get_versions("email"), vec!["v1"]);
}

#[test]
fn injected_template_syntax_is_stripped_from_input() {
    let input = PromptInput::new("chat", "Help {{role}} users").with_variable("role", "{{tone}}Guide");
    let out = engine().generate_prompt(&input, &mut History::default()).unwrap();
    assert_eq!(out.prompt["goals"], json!(["Help  users"]));
    assert_eq!(out.prompt["role"], json!("Guide"));
}
