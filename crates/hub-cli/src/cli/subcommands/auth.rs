use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Email a sign-in link and one-time code.
    Login(AuthLoginArgs),
    /// Finish signing in with the code from the email.
    Verify(AuthVerifyArgs),
    /// Sign in with the access token from a magic-link redirect.
    Token(AuthTokenArgs),
    /// Show current auth status.
    Status,
    /// Sign out and clear stored credentials.
    Logout,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    pub email: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthVerifyArgs {
    pub email: String,
    /// One-time code from the sign-in email.
    pub code: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthTokenArgs {
    /// `access_token` from the redirect url fragment.
    pub token: String,
}
