use hub_view::LinkController;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IdArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct OpenResponse {
    id: String,
    url: String,
    clicks: u64,
    launched: bool,
}

/// Handle `linkhub open`.
pub async fn handle(args: &IdArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = open_link(&mut ctx.controller, &args.id, launch_browser).await?;
    output(&response, flags.format)
}

/// Hand the url to `launch` first, then count the click.
async fn open_link(
    controller: &mut LinkController,
    id: &str,
    launch: impl FnOnce(&str) -> bool,
) -> anyhow::Result<OpenResponse> {
    let url = controller.share(id)?.to_string();
    let launched = launch(&url);

    controller.record_click(id).await;
    let clicks = controller.find(id).map_or(0, |link| link.clicks);

    Ok(OpenResponse {
        id: id.to_string(),
        url,
        clicks,
        launched,
    })
}

fn launch_browser(url: &str) -> bool {
    match open::that(url) {
        Ok(()) => true,
        Err(error) => {
            eprintln!("Failed to open browser: {error}");
            eprintln!("Open the URL manually: {url}");
            false
        }
    }
}
