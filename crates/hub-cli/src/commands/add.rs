use hub_view::LinkForm;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AddArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `linkhub add`.
pub async fn handle(args: AddArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.controller.require_admin("add links")?;
    let record = ctx.controller.create(form_from_args(args)).await?;
    output(&record, flags.format)
}

fn form_from_args(args: AddArgs) -> LinkForm {
    LinkForm {
        title: args.title,
        url: args.url,
        description: args.description.unwrap_or_default(),
        category: args.category.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        tags: args.tags.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::form_from_args;
    use crate::cli::root_commands::AddArgs;

    #[test]
    fn omitted_fields_are_blank() {
        let form = form_from_args(AddArgs {
            title: "Stok".into(),
            url: "https://sheets.example.com/stok".into(),
            description: None,
            category: Some("Inbound".into()),
            location: None,
            tags: Some("harian, stok".into()),
        });
        assert_eq!(form.description, "");
        assert_eq!(form.category, "Inbound");
        assert_eq!(form.tags, "harian, stok");
    }
}
