use hub_auth::SessionManager;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub async fn handle(session: &SessionManager, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Err(error) = session.rehydrate().await {
        tracing::warn!(%error, "could not restore session before sign-out");
    }
    session.sign_out().await?;
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}
