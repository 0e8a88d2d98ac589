//! Template-driven prompt generation.

use chrono::Utc;
use pf_config::GenerationConfig;
use pf_core::hash::input_hash;
use pf_core::{GenerationRecord, History, ValidationResult};
use pf_schema::{RepairOutcome, SchemaEntry, SchemaRegistry, repair, validate};
use pf_template::{TemplateContext, TemplateEngine};
use serde_json::{Value, json};

use crate::adapters::{AdapterTable, DomainAdapter};
use crate::error::EngineError;
use crate::input::{GeneratedPrompt, GenerationMeta, PromptInput};

/// Version under which every adapter's schema and template are seeded.
pub const BUILTIN_SCHEMA_VERSION: &str = "v1";

/// Adapter, schema registry, template engine, and generation settings.
///
/// Read-only once built, apart from explicit registry changes. Mutable
/// history is owned by the caller and passed into each generation.
#[derive(Debug, Clone)]
pub struct Engine {
    adapters: AdapterTable,
    registry: SchemaRegistry,
    templates: TemplateEngine,
    config: GenerationConfig,
}

/// The adapter and schema entry selected for one request.
pub(crate) struct Resolved<'a> {
    pub adapter: &'a DomainAdapter,
    pub entry: &'a SchemaEntry,
}

impl Engine {
    /// An engine over the built-in domains.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Schema` if an adapter schema cannot be seeded.
    pub fn new(config: GenerationConfig) -> Result<Self, EngineError> {
        Self::with_adapters(AdapterTable::builtin(), config)
    }

    /// An engine over `adapters`, seeding each schema and template at
    /// [`BUILTIN_SCHEMA_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Schema` if an adapter schema cannot be seeded.
    pub fn with_adapters(
        adapters: AdapterTable,
        config: GenerationConfig,
    ) -> Result<Self, EngineError> {
        let mut registry = SchemaRegistry::new();
        for adapter in adapters.iter() {
            registry.register_entry(
                SchemaEntry::new(
                    adapter.name(),
                    BUILTIN_SCHEMA_VERSION,
                    adapter.schema.clone(),
                    adapter.template.clone(),
                )
                .with_examples(adapter.examples.clone())
                .with_changelog(format!("Initial {} schema", adapter.name())),
            )?;
        }
        Ok(Self {
            adapters,
            registry,
            templates: TemplateEngine::new(),
            config,
        })
    }

    #[must_use]
    pub const fn adapters(&self) -> &AdapterTable {
        &self.adapters
    }

    #[must_use]
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Registry access for imports and new schema versions.
    pub fn registry_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.registry
    }

    #[must_use]
    pub const fn templates(&self) -> &TemplateEngine {
        &self.templates
    }

    /// Template engine access for registering custom helpers.
    pub fn templates_mut(&mut self) -> &mut TemplateEngine {
        &mut self.templates
    }

    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Add a new schema version for an existing domain. The schema must pass
    /// the user-schema allow-list.
    ///
    /// # Errors
    ///
    /// `UnknownDomain` for an unregistered domain, otherwise any
    /// `SchemaError` from registration.
    pub fn register_schema_version(
        &mut self,
        domain: &str,
        version: &str,
        schema: Value,
        template: &str,
    ) -> Result<(), EngineError> {
        let adapter = self
            .adapters
            .lookup(domain)
            .ok_or_else(|| EngineError::UnknownDomain(domain.trim().to_string()))?;
        let name = adapter.name().to_string();
        self.registry
            .register_user_schema(&name, version, schema, template)?;
        Ok(())
    }

    /// Render the domain template for `input`, then validate and (optionally)
    /// repair the result. The record is appended to `history`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for an empty domain or task description, or a
    ///   missing domain-required variable
    /// - `UnknownDomain` when no adapter matches `input.domain`
    /// - `Schema` when the requested schema version does not exist
    /// - `Template` when rendering fails
    /// - `Validation` when the result is invalid and strict mode is on
    pub fn generate_prompt(
        &self,
        input: &PromptInput,
        history: &mut History,
    ) -> Result<GeneratedPrompt, EngineError> {
        let resolved = self.resolve(input)?;
        let context = build_context(resolved.adapter, input);
        let document = self
            .templates
            .render_value(&resolved.entry.template, &context)?;
        tracing::debug!(
            domain = resolved.adapter.name(),
            version = %resolved.entry.version,
            "rendered template"
        );
        self.finish(document, input, &resolved, None, history)
    }

    /// Validate `document` against a registered domain schema.
    ///
    /// # Errors
    ///
    /// `UnknownDomain` for an unregistered domain, `Schema` for a missing
    /// version or uncompilable schema.
    pub fn validate_document(
        &self,
        domain: &str,
        version: Option<&str>,
        document: &Value,
    ) -> Result<ValidationResult, EngineError> {
        let adapter = self
            .adapters
            .lookup(domain)
            .ok_or_else(|| EngineError::UnknownDomain(domain.trim().to_string()))?;
        Ok(self.registry.validate(adapter.name(), version, document)?)
    }

    /// Check the request and pick the adapter and schema entry.
    pub(crate) fn resolve(&self, input: &PromptInput) -> Result<Resolved<'_>, EngineError> {
        if input.domain.trim().is_empty() {
            return Err(EngineError::InvalidRequest("domain is required".to_string()));
        }
        if input.task_description.trim().is_empty() {
            return Err(EngineError::InvalidRequest(
                "task_description is required".to_string(),
            ));
        }
        let adapter = self
            .adapters
            .lookup(&input.domain)
            .ok_or_else(|| EngineError::UnknownDomain(input.domain.trim().to_string()))?;
        check_required(adapter, input)?;
        let entry = self
            .registry
            .resolve(adapter.name(), input.schema_version.as_deref())?;
        Ok(Resolved { adapter, entry })
    }

    /// Validate or repair `document`, record it, and build the response.
    /// `via` names the provider when the document came from AI mode.
    pub(crate) fn finish(
        &self,
        document: Value,
        input: &PromptInput,
        resolved: &Resolved<'_>,
        via: Option<&str>,
        history: &mut History,
    ) -> Result<GeneratedPrompt, EngineError> {
        let Resolved { adapter, entry } = resolved;
        let auto_repair = input.auto_repair.unwrap_or(self.config.auto_repair);
        let outcome = if auto_repair {
            repair(
                document,
                &entry.schema,
                &adapter.defaults,
                self.config.max_repair_attempts,
            )
        } else {
            RepairOutcome {
                validation: validate(&document, &entry.schema),
                document,
                attempts: 0,
            }
        };

        if self.config.strict && !outcome.validation.valid {
            tracing::warn!(
                domain = adapter.name(),
                issues = ?outcome.validation.messages(),
                "strict mode rejected invalid prompt"
            );
            return Err(EngineError::Validation {
                errors: outcome.validation.errors,
            });
        }

        let record = GenerationRecord {
            input_hash: input_hash(&input.to_value()),
            domain: adapter.name().to_string(),
            schema_version: entry.version.clone(),
            template_version: entry.version.clone(),
            prompt: outcome.document,
            validation: outcome.validation,
            repair_attempts: outcome.attempts,
            created_at: Utc::now(),
        };
        let mut provenance = record.provenance();
        if let Some(provider) = via {
            provenance.adapter_used = format!("{}+{provider}", adapter.name());
        }

        tracing::info!(
            domain = %record.domain,
            valid = record.validation.valid,
            repair_attempts = record.repair_attempts,
            "generated prompt"
        );
        history.append(record.clone());

        Ok(GeneratedPrompt {
            prompt: record.prompt,
            domain: record.domain,
            schema_version: record.schema_version,
            template_version: record.template_version,
            validation: record.validation,
            meta: GenerationMeta {
                generated_at: record.created_at,
                provenance,
            },
        })
    }
}

/// Validate `document` against `schema`. Pure.
#[must_use]
pub fn validate_prompt(document: &Value, schema: &Value) -> ValidationResult {
    validate(document, schema)
}

fn check_required(adapter: &DomainAdapter, input: &PromptInput) -> Result<(), EngineError> {
    let missing: Vec<&str> = adapter
        .required_fields
        .iter()
        .map(String::as_str)
        .filter(|field| *field != "task_description")
        .filter(|field| !is_present(input.variables.get(*field)))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(EngineError::InvalidRequest(format!(
        "domain '{}' requires variable(s): {}",
        adapter.name(),
        missing.join(", ")
    )))
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Template context for `input`.
///
/// - defaults: adapter defaults plus `today` (`YYYY-MM-DD`)
/// - variables: caller variables, then `domain`, `task_description`, and
///   `constraints` from the request itself
/// - conditionals: `has_constraints`
pub(crate) fn build_context(adapter: &DomainAdapter, input: &PromptInput) -> TemplateContext {
    let mut context = TemplateContext::new()
        .with_default("today", Utc::now().format("%Y-%m-%d").to_string())
        .with_conditional("has_constraints", !input.constraints.is_empty());
    context.defaults.extend(adapter.defaults.clone());
    context.variables = input.variables.clone();
    context
        .variables
        .insert("domain".to_string(), json!(adapter.name()));
    context.variables.insert(
        "task_description".to_string(),
        json!(input.task_description.trim()),
    );
    context
        .variables
        .insert("constraints".to_string(), json!(input.constraints));
    context
}
