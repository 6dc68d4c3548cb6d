use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::cli::subcommands::ExportFormat;
use crate::context::AppContext;
use crate::output::output;

/// Handle `linkhub export`.
pub fn handle(args: ExportArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.controller.require_admin("export links")?;
    if let Some(dir) = args.out {
        ctx.controller.set_export_dir(dir);
    }
    let path = match args.kind {
        ExportFormat::Csv => ctx.controller.export_csv()?,
        ExportFormat::Json => ctx.controller.export_json()?,
    };
    output(
        &json!({ "path": path, "count": ctx.controller.links().len() }),
        flags.format,
    )
}
