use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pforge history`.
pub fn handle(
    action: &HistoryCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HistoryCommands::List { limit } => {
            let entries = ctx.history.entries();
            let shown = limit.map_or(entries.len(), |limit| limit.min(entries.len()));
            let shown = &entries[..shown];
            output(&shown, flags.format)
        }
        HistoryCommands::Clear => {
            let cleared = ctx.history.len();
            ctx.history.clear();
            ctx.save_history()?;
            output(&json!({"cleared": cleared}), flags.format)
        }
    }
}
