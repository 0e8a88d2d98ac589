//! AI mode: an LLM provider writes the document instead of the template.

use pf_core::History;
use pf_provider::{CompletionProvider, CompletionRequest, extract_json};

use crate::engine::{Engine, Resolved};
use crate::error::EngineError;
use crate::input::{GeneratedPrompt, PromptInput};

impl Engine {
    /// Ask `provider` for a document conforming to the domain schema, then
    /// validate and repair it exactly like [`Engine::generate_prompt`].
    ///
    /// The provider is called once; failures are returned, never retried.
    ///
    /// # Errors
    ///
    /// Everything [`Engine::generate_prompt`] can return except `Template`,
    /// plus `Provider` for transport failures, error statuses, and completions
    /// without a JSON document.
    pub async fn generate_with_provider<P: CompletionProvider>(
        &self,
        input: &PromptInput,
        provider: &P,
        history: &mut History,
    ) -> Result<GeneratedPrompt, EngineError> {
        let resolved = self.resolve(input)?;
        let request = completion_request(&resolved, input)?;
        let text = provider.complete(&request).await?;
        let document = extract_json(&text)?;
        tracing::debug!(
            domain = resolved.adapter.name(),
            provider = provider.name(),
            "received provider document"
        );
        self.finish(document, input, &resolved, Some(provider.name()), history)
    }
}

/// System instruction (adapter instruction + schema + example) and user
/// prompt (task, constraints, variables) for one request.
fn completion_request(
    resolved: &Resolved<'_>,
    input: &PromptInput,
) -> Result<CompletionRequest, EngineError> {
    let Resolved { adapter, entry } = resolved;
    let schema = serde_json::to_string_pretty(&entry.schema).map_err(pf_core::CoreError::from)?;

    let mut system = format!(
        "{}\nRespond with a single JSON object and nothing else. \
         It must conform to this JSON Schema:\n{schema}",
        adapter.system_instruction
    );
    if let Some(example) = entry.examples.first() {
        let example = serde_json::to_string_pretty(example).map_err(pf_core::CoreError::from)?;
        system.push_str("\nExample:\n");
        system.push_str(&example);
    }

    let mut prompt = input.task_description.trim().to_string();
    if !input.constraints.is_empty() {
        prompt.push_str("\nConstraints:");
        for constraint in &input.constraints {
            prompt.push_str("\n- ");
            prompt.push_str(constraint);
        }
    }
    if !input.variables.is_empty() {
        let variables =
            serde_json::to_string_pretty(&input.variables).map_err(pf_core::CoreError::from)?;
        prompt.push_str("\nUse these values where they apply:\n");
        prompt.push_str(&variables);
    }

    Ok(CompletionRequest::new(system, prompt))
}
