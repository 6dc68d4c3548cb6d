use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IdArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `linkhub share`.
pub fn handle(args: &IdArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let url = ctx.controller.share(&args.id)?;
    output(&json!({ "id": args.id, "url": url }), flags.format)
}
