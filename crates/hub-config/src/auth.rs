//! Passwordless sign-in settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Where the magic link in the sign-in email should land.
    #[serde(default)]
    pub redirect_url: String,
}

impl AuthConfig {
    pub fn redirect(&self) -> Option<&str> {
        let url = self.redirect_url.trim();
        (!url.is_empty()).then_some(url)
    }
}
