use hub_store::StoreError;
use hub_view::HubError;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let result = match command {
        Commands::List(args) => commands::list::handle(&args, ctx, flags),
        Commands::Facets => commands::facets::handle(ctx, flags),
        Commands::Add(args) => commands::add::handle(args, ctx, flags).await,
        Commands::Edit(args) => commands::edit::handle(args, ctx, flags).await,
        Commands::Favorite(args) => commands::favorite::handle(&args, ctx, flags).await,
        Commands::Delete(args) => commands::delete::handle(&args, ctx, flags).await,
        Commands::Open(args) => commands::open::handle(&args, ctx, flags).await,
        Commands::Share(args) => commands::share::handle(&args, ctx, flags),
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(args, ctx, flags),
        Commands::Auth { .. } => unreachable!("auth is pre-dispatched in main"),
    };

    if result.as_ref().err().is_some_and(is_unauthorized) {
        ctx.session.expire();
        if let Err(error) = ctx.sync_session().await {
            tracing::warn!(%error, "reload after session expiry failed");
        }
        return result.map_err(|error| {
            error.context("session expired; sign in again with `linkhub auth login`")
        });
    }
    result
}

fn is_unauthorized(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<HubError>(),
        Some(HubError::Store(StoreError::Status { status: 401, .. }))
    )
}

#[cfg(test)]
mod tests {
    use hub_store::StoreError;
    use hub_view::HubError;

    use super::is_unauthorized;

    #[test]
    fn only_store_401_counts_as_unauthorized() {
        let unauthorized = anyhow::Error::from(HubError::Store(StoreError::Status {
            status: 401,
            message: "JWT expired".into(),
        }));
        let forbidden = anyhow::Error::from(HubError::Store(StoreError::Status {
            status: 403,
            message: "permission denied".into(),
        }));
        assert!(is_unauthorized(&unauthorized));
        assert!(!is_unauthorized(&forbidden));
        assert!(!is_unauthorized(&anyhow::anyhow!("other")));
    }
}
