mod auth;
mod export;

pub use auth::{AuthCommands, AuthLoginArgs, AuthTokenArgs, AuthVerifyArgs};
pub use export::ExportFormat;
