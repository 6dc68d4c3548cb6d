use hub_auth::SessionManager;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthVerifyArgs;
use crate::output::output;

pub async fn handle(
    args: &AuthVerifyArgs,
    session: &SessionManager,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let signed_in = session.verify_login(&args.email, &args.code).await?;
    output(
        &SignedInResponse::new(&signed_in, session.token_source()),
        flags.format,
    )
}
