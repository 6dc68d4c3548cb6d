use crate::cli::GlobalFlags;
use crate::cli::root_commands::IdArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `linkhub favorite`.
pub async fn handle(args: &IdArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = ctx.controller.toggle_favorite(&args.id).await?;
    output(&record, flags.format)
}
