use crate::cli::GlobalFlags;
use crate::cli::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::handle(&args, ctx, flags).await,
        Commands::Validate(args) => commands::validate::handle(&args, ctx, flags),
        Commands::Schema { action } => commands::schema::handle(&action, ctx, flags),
        Commands::Template { action } => commands::template::handle(&action, ctx, flags),
        Commands::History { action } => commands::history::handle(&action, ctx, flags),
        Commands::Domains => commands::domains::handle(ctx, flags),
    }
}
