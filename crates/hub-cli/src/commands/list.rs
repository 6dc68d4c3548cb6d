use hub_search::FilterState;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::{LINK_COLUMNS, output_rows};

/// Handle `linkhub list`.
pub fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = filter_from_args(args);
    let mut links = ctx.controller.visible(&filter);
    if let Some(limit) = effective_limit(flags.limit, ctx.config.general.default_limit) {
        links.truncate(limit);
    }
    tracing::debug!(shown = links.len(), total = ctx.controller.links().len(), "list");
    output_rows(&links, LINK_COLUMNS, flags.format)
}

fn filter_from_args(args: &ListArgs) -> FilterState {
    FilterState {
        query: args.search.clone().unwrap_or_default(),
        favorite_only: args.favorites,
        category: args.category.clone(),
        location: args.location.clone(),
        tag: args.tag.clone(),
    }
}
