use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::commands::shared::parse::read_json;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pforge validate`. Prints the result and fails when the document
/// does not match.
pub fn handle(args: &ValidateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let document = read_json(&args.document)?;
    let result =
        ctx.engine
            .validate_document(&args.domain, args.schema_version.as_deref(), &document)?;
    output(&result, flags.format)?;
    if !result.valid {
        anyhow::bail!(
            "document failed validation against {}: {}",
            args.domain,
            result.messages().join("; ")
        );
    }
    Ok(())
}
