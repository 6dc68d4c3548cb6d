//! # hub-auth
//!
//! Passwordless authentication for Link Hub.
//!
//! Sends magic-link / one-time-code emails through the Supabase auth API,
//! tracks the current session with change notification, and keeps the
//! access token in the OS keychain (`keyring`) with env and file fallbacks.

pub mod error;
pub mod gateway;
pub mod manager;
pub mod refresh;
pub mod token_store;

pub use error::AuthError;
pub use gateway::{AuthGateway, AuthUser, SupabaseAuth, TokenGrant};
pub use manager::{SessionEvent, SessionManager, SessionState, Subscription};
pub use token_store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
