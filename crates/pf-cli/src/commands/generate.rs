use anyhow::Context;
use pf_engine::PromptInput;
use pf_engine::autosave::{load_autosave, save_autosave};
use pf_provider::ProviderClient;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::commands::shared::parse::parse_assignments;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pforge generate`.
pub async fn handle(
    args: &GenerateArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let input = if args.resume {
        load_autosave(&ctx.store)?.context("no autosaved input to resume")?
    } else {
        let input = build_input(args)?;
        save_autosave(&mut ctx.store, &input)?;
        input
    };

    let generated = if args.ai {
        let client = ProviderClient::from_config(&ctx.config.provider)
            .context("--ai needs a configured provider (set PROMPTFORGE_PROVIDER__API_KEY)")?;
        ctx.engine
            .generate_with_provider(&input, &client, &mut ctx.history)
            .await?
    } else {
        ctx.engine.generate_prompt(&input, &mut ctx.history)?
    };
    ctx.save_history()?;

    if !generated.validation.valid {
        tracing::warn!(
            errors = generated.validation.errors.len(),
            "generated prompt does not match its schema"
        );
    }
    output(&generated, flags.format)
}

fn build_input(args: &GenerateArgs) -> anyhow::Result<PromptInput> {
    let (Some(domain), Some(task)) = (&args.domain, &args.task) else {
        anyhow::bail!("generate needs a domain and a task description, or --resume");
    };
    Ok(PromptInput {
        domain: domain.clone(),
        task_description: task.clone(),
        constraints: args.constraints.clone(),
        variables: parse_assignments(&args.vars)?,
        schema_version: args.schema_version.clone(),
        auto_repair: args.no_repair.then_some(false),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::build_input;
    use crate::cli::root_commands::GenerateArgs;

    fn args() -> GenerateArgs {
        GenerateArgs {
            domain: Some("code".into()),
            task: Some("Write a tokenizer".into()),
            constraints: vec!["No allocations in the hot loop".into()],
            vars: vec!["language=rust".into(), "include_tests=true".into()],
            schema_version: None,
            no_repair: false,
            ai: false,
            resume: false,
        }
    }

    #[test]
    fn input_carries_parsed_variables() {
        let input = build_input(&args()).expect("input should build");
        assert_eq!(input.domain, "code");
        assert_eq!(input.variables.get("language"), Some(&json!("rust")));
        assert_eq!(input.variables.get("include_tests"), Some(&json!(true)));
        assert_eq!(input.auto_repair, None);
    }

    #[test]
    fn no_repair_disables_repair_for_the_request() {
        let mut args = args();
        args.no_repair = true;
        let input = build_input(&args).expect("input should build");
        assert_eq!(input.auto_repair, Some(false));
    }

    #[test]
    fn missing_task_is_an_error() {
        let mut args = args();
        args.task = None;
        assert!(build_input(&args).is_err());
    }
}
