//! Remote store connection settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g., `https://abcd.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public anonymous API key. Row-level security decides what it can see.
    #[serde(default)]
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Both the project URL and the anon key are present.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    /// Names of the required keys that are still blank.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.trim().is_empty() {
            missing.push("supabase.url");
        }
        if self.anon_key.trim().is_empty() {
            missing.push("supabase.anon_key");
        }
        missing
    }

    /// Base URL of the table API, without a trailing slash.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base())
    }

    /// Base URL of the auth API, without a trailing slash.
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.base())
    }

    fn base(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }
}
