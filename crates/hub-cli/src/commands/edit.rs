use hub_view::{HubError, LinkForm};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EditArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `linkhub edit`.
pub async fn handle(args: EditArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.controller.require_admin("edit links")?;
    let current = ctx
        .controller
        .find(&args.id)
        .ok_or_else(|| HubError::NotFound(args.id.clone()))?;
    let form = merge(LinkForm::from_record(current), &args);
    let record = ctx.controller.update(&args.id, form).await?;
    output(&record, flags.format)
}

/// Overlay the fields given on the command line onto the current values.
fn merge(mut form: LinkForm, args: &EditArgs) -> LinkForm {
    let fields = [
        (&mut form.title, &args.title),
        (&mut form.url, &args.url),
        (&mut form.description, &args.description),
        (&mut form.category, &args.category),
        (&mut form.location, &args.location),
        (&mut form.tags, &args.tags),
    ];
    for (slot, value) in fields {
        if let Some(value) = value {
            slot.clone_from(value);
        }
    }
    form
}
