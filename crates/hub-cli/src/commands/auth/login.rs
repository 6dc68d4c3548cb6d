use hub_auth::SessionManager;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    email: String,
    sent: bool,
    next: &'static str,
}

pub async fn handle(
    args: &AuthLoginArgs,
    session: &SessionManager,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    session.request_login_challenge(&args.email).await?;
    output(
        &AuthLoginResponse {
            email: args.email.trim().to_string(),
            sent: true,
            next: "run `linkhub auth verify <email> <code>` with the code from the email",
        },
        flags.format,
    )
}
