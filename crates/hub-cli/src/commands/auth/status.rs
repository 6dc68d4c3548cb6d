use hub_auth::SessionManager;
use serde::Serialize;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct SignedOutResponse {
    authenticated: bool,
    note: String,
}

pub async fn handle(session: &SessionManager, flags: &GlobalFlags) -> anyhow::Result<()> {
    match session.rehydrate().await {
        Ok(Some(restored)) => output(
            &SignedInResponse::new(&restored, session.token_source()),
            flags.format,
        ),
        Ok(None) => output(
            &SignedOutResponse {
                authenticated: false,
                note: "no valid token found".into(),
            },
            flags.format,
        ),
        Err(error) => output(
            &SignedOutResponse {
                authenticated: false,
                note: error.to_string(),
            },
            flags.format,
        ),
    }
}
