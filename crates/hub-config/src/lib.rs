//! # hub-config
//!
//! Layered configuration loading for Link Hub using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LINKHUB_*` prefix, `__` as separator)
//! 2. `NEXT_PUBLIC_SUPABASE_URL` / `NEXT_PUBLIC_SUPABASE_ANON_KEY`
//! 3. Project-level `.linkhub/config.toml`
//! 4. User-level `~/.config/linkhub/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LINKHUB_SUPABASE__URL` -> `supabase.url`,
//! `LINKHUB_STORE__TIMEOUT_SECS` -> `store.timeout_secs`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use hub_config::HubConfig;
//!
//! let config = HubConfig::load_with_dotenv().expect("config");
//! match config.require_store() {
//!     Ok(supabase) => println!("Store: {}", supabase.rest_url()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

mod auth;
mod error;
mod general;
mod store;
mod supabase;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use store::StoreConfig;
pub use supabase::SupabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env var names used by the web deployment of the portal.
const PUBLIC_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
const PUBLIC_ANON_KEY_VAR: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HubConfig {
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl HubConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".linkhub/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Web deployment names
        figment = figment.merge(Self::public_env());

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("LINKHUB_").split("__"))
    }

    /// The store section, or the setup error naming what is missing.
    pub fn require_store(&self) -> Result<&SupabaseConfig, ConfigError> {
        if self.supabase.is_configured() {
            return Ok(&self.supabase);
        }
        Err(ConfigError::NotConfigured {
            section: "supabase".to_string(),
            missing: self.supabase.missing_keys().join(" and "),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.general.csv_file_name.trim().is_empty()
            || self.general.json_file_name.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "general.csv_file_name / general.json_file_name".to_string(),
                reason: "export file names cannot be blank".to_string(),
            });
        }
        Ok(())
    }

    fn public_env() -> Env {
        Env::raw()
            .only(&[PUBLIC_URL_VAR, PUBLIC_ANON_KEY_VAR])
            .map(|key| {
                if key.as_str().eq_ignore_ascii_case(PUBLIC_URL_VAR) {
                    "supabase.url".into()
                } else {
                    "supabase.anon_key".into()
                }
            })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("linkhub").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or falls back to the
    /// current dir. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
