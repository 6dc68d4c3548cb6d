mod login;
mod logout;
mod status;
mod token;
mod verify;

use hub_config::HubConfig;
use hub_core::identity::Session;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::session_manager;

/// Handle `linkhub auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &HubConfig,
) -> anyhow::Result<()> {
    let session = session_manager(config)?;
    match action {
        AuthCommands::Login(args) => login::handle(args, &session, flags).await,
        AuthCommands::Verify(args) => verify::handle(args, &session, flags).await,
        AuthCommands::Token(args) => token::handle(args, &session, flags).await,
        AuthCommands::Status => status::handle(&session, flags).await,
        AuthCommands::Logout => logout::handle(&session, flags).await,
    }
}

#[derive(Serialize)]
struct SignedInResponse {
    authenticated: bool,
    user_id: String,
    email: Option<String>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
}

impl SignedInResponse {
    fn new(session: &Session, token_source: Option<&'static str>) -> Self {
        Self {
            authenticated: true,
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            expires_at: session.expires_at.map(|at| at.to_rfc3339()),
            token_source,
        }
    }
}
