use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DeleteArgs;
use crate::commands::shared::prompt::confirm_on_stdin;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Handle `linkhub delete`.
pub async fn handle(args: &DeleteArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.controller.require_admin("delete links")?;

    let deleted = if args.yes {
        ctx.controller.delete(&args.id, &|_: &str| true).await?
    } else if ui::prefs().interactive {
        ctx.controller.delete(&args.id, &confirm_on_stdin).await?
    } else {
        anyhow::bail!("refusing to delete without confirmation; pass --yes")
    };

    output(&json!({ "deleted": deleted, "id": args.id }), flags.format)
}
