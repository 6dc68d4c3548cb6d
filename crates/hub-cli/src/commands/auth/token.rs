use hub_auth::SessionManager;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthTokenArgs;
use crate::output::output;

pub async fn handle(
    args: &AuthTokenArgs,
    session: &SessionManager,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let signed_in = session.complete_with_token(&args.token).await?;
    output(
        &SignedInResponse::new(&signed_in, session.token_source()),
        flags.format,
    )
}
