use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DomainSummary<'a> {
    name: &'a str,
    description: &'a str,
    builtin: bool,
    required_fields: &'a [String],
    versions: Vec<String>,
}

/// Handle `pforge domains`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = ctx.engine.registry();
    let summaries = ctx
        .engine
        .adapters()
        .iter()
        .map(|adapter| DomainSummary {
            name: adapter.name(),
            description: &adapter.description,
            builtin: adapter.domain.is_builtin(),
            required_fields: &adapter.required_fields,
            versions: registry.get_versions(adapter.name()),
        })
        .collect::<Vec<_>>();
    output(&summaries, flags.format)
}
