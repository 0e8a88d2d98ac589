use anyhow::Context;
use pf_schema::{RegistrySnapshot, validate_user_schema};
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SchemaCommands;
use crate::commands::shared::parse::{read_json, read_text};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemaSummary<'a> {
    name: &'a str,
    versions: Vec<String>,
    latest: Option<&'a str>,
}

/// Handle `pforge schema`.
pub fn handle(
    action: &SchemaCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SchemaCommands::List => {
            let registry = ctx.engine.registry();
            let summaries = registry
                .list()
                .into_iter()
                .map(|name| SchemaSummary {
                    name,
                    versions: registry.get_versions(name),
                    latest: registry.latest(name).map(|entry| entry.version.as_str()),
                })
                .collect::<Vec<_>>();
            output(&summaries, flags.format)
        }
        SchemaCommands::Show {
            name,
            schema_version,
        } => {
            let entry = ctx
                .engine
                .registry()
                .resolve(name.trim(), schema_version.as_deref())?;
            output(entry, flags.format)
        }
        SchemaCommands::Export { output: path } => {
            let snapshot = ctx.engine.registry().export_registry();
            match path {
                Some(path) => {
                    let text = serde_json::to_string_pretty(&snapshot)?;
                    std::fs::write(path, text).with_context(|| format!("failed to write {path}"))?;
                    output(
                        &json!({"exported": snapshot.entries.len(), "path": path}),
                        flags.format,
                    )
                }
                None => output(&snapshot, flags.format),
            }
        }
        SchemaCommands::Import { file } => {
            let snapshot: RegistrySnapshot = serde_json::from_value(read_json(file)?)
                .with_context(|| format!("{file} is not a registry snapshot"))?;
            let imported = ctx.engine.registry_mut().import_registry(snapshot)?;
            ctx.save_registry()?;
            tracing::info!(imported, "imported schema registry");
            output(&json!({"imported": imported}), flags.format)
        }
        SchemaCommands::Check { file } => {
            let report = validate_user_schema(&read_json(file)?);
            output(&report, flags.format)?;
            if !report.accepted {
                anyhow::bail!("{file} was rejected: {}", report.reasons.join("; "));
            }
            Ok(())
        }
        SchemaCommands::Register {
            domain,
            version,
            schema,
            template,
        } => {
            let schema = read_json(schema)?;
            let template = read_text(template)?;
            ctx.engine
                .register_schema_version(domain, version, schema, &template)?;
            ctx.save_registry()?;
            let name = ctx
                .engine
                .adapters()
                .lookup(domain)
                .map_or(domain.as_str(), |adapter| adapter.name());
            let entry = ctx.engine.registry().resolve(name, Some(version))?;
            output(entry, flags.format)
        }
    }
}
