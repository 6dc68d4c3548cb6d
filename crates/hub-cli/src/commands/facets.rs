use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `linkhub facets`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.controller.facets(), flags.format)
}
