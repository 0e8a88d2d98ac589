use pf_template::TemplateContext;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TemplateCommands;
use crate::commands::shared::parse::{parse_assignments, read_text};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TemplateVariables {
    variables: Vec<String>,
    helpers: Vec<String>,
}

/// Handle `pforge template`.
pub fn handle(
    action: &TemplateCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let templates = ctx.engine.templates();
    match action {
        TemplateCommands::Render {
            file,
            vars,
            defaults,
            enabled,
        } => {
            let template = read_text(file)?;
            let context = TemplateContext {
                variables: parse_assignments(vars)?,
                defaults: parse_assignments(defaults)?,
                conditionals: enabled.iter().map(|name| (name.clone(), true)).collect(),
            };
            let rendered = templates.compile(&template, &context)?;
            // JSON output is passed through structurally; anything else as a string.
            let value = serde_json::from_str::<Value>(&rendered).unwrap_or(Value::String(rendered));
            output(&value, flags.format)
        }
        TemplateCommands::Vars { file } => {
            let template = read_text(file)?;
            let variables = templates
                .extract_variables(&template)
                .into_iter()
                .collect::<Vec<_>>();
            let helpers = templates
                .helper_names()
                .into_iter()
                .filter(|name| template.contains(&format!("{{{{{name} ")))
                .map(str::to_string)
                .collect();
            output(&TemplateVariables { variables, helpers }, flags.format)
        }
    }
}
