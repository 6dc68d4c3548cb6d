use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "linkhub-cli";
const KEYRING_USER: &str = "supabase-access-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV_VAR: &str = "LINKHUB_AUTH__TOKEN";

/// Where the access token survives between runs.
pub trait TokenStore: Send + Sync {
    /// Persist `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if no tier could hold the token.
    fn store(&self, token: &str) -> Result<(), AuthError>;

    fn load(&self) -> Option<String>;

    /// Remove the persisted token. Missing tokens are not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the token could not be removed.
    fn delete(&self) -> Result<(), AuthError>;

    /// Which tier the current token came from (for status display).
    fn source(&self) -> Option<&'static str>;
}

// --- File tier ---

/// A single token in a `0600` file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.linkhub/credentials`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the home directory is unknown.
    pub fn default_location() -> Result<Self, AuthError> {
        dirs::home_dir()
            .map(|h| Self::new(h.join(".linkhub").join(CREDENTIALS_FILE_NAME)))
            .ok_or_else(|| {
                AuthError::TokenStoreError(
                    "home directory not found — cannot store credentials".into(),
                )
            })
    }

    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn store(&self, token: &str) -> Result<(), AuthError> {
        let path = &self.path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, token)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn delete(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }

    fn source(&self) -> Option<&'static str> {
        self.load().map(|_| "file")
    }
}

// --- Layered store ---

/// OS keychain first, then `LINKHUB_AUTH__TOKEN`, then the credentials file.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
    file: FileTokenStore,
}

impl KeyringTokenStore {
    #[must_use]
    pub fn new(service: impl Into<String>, file: FileTokenStore) -> Self {
        Self {
            service: service.into(),
            file,
        }
    }

    /// The production store.
    ///
    /// The keyring service defaults to `"linkhub-cli"` and can be overridden
    /// with `LINKHUB_KEYRING_SERVICE` so tests never touch real credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the home directory is unknown.
    pub fn system() -> Result<Self, AuthError> {
        let service = std::env::var("LINKHUB_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        Ok(Self::new(service, FileTokenStore::default_location()?))
    }

    fn entry(&self) -> Option<keyring::Entry> {
        keyring::Entry::new(&self.service, KEYRING_USER).ok()
    }

    fn load_keyring(&self) -> Option<String> {
        self.entry()
            .and_then(|entry| entry.get_password().ok())
            .filter(|token| !token.is_empty())
    }

    fn load_env() -> Option<String> {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

impl TokenStore for KeyringTokenStore {
    fn store(&self, token: &str) -> Result<(), AuthError> {
        let Some(entry) = self.entry() else {
            tracing::warn!("keyring unavailable; falling back to file");
            return self.file.store(token);
        };
        if let Err(error) = entry.set_password(token) {
            tracing::warn!(%error, "keyring store failed; falling back to file");
            return self.file.store(token);
        }
        // Some backends accept writes they cannot read back in a later process.
        if self.load_keyring().as_deref() != Some(token) {
            tracing::warn!("keyring did not retain the token; falling back to file");
            return self.file.store(token);
        }
        Ok(())
    }

    fn load(&self) -> Option<String> {
        self.load_keyring()
            .or_else(Self::load_env)
            .or_else(|| self.file.load())
    }

    fn delete(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.entry() {
            let _ = entry.delete_credential();
        }
        self.file.delete()
    }

    fn source(&self) -> Option<&'static str> {
        if self.load_keyring().is_some() {
            return Some("keyring");
        }
        if Self::load_env().is_some() {
            return Some("env");
        }
        self.file.source()
    }
}

// --- In-process store ---

/// Holds the token for the life of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn store(&self, token: &str) -> Result<(), AuthError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn delete(&self) -> Result<(), AuthError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn source(&self) -> Option<&'static str> {
        self.load().map(|_| "memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_is_under_home() {
        let store = FileTokenStore::default_location().expect("should resolve");
        assert!(store.path().ends_with(".linkhub/credentials"));
    }

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileTokenStore::new(tmp.path().join("nested").join("credentials"));

        store.store("test_jwt_abc123").expect("store");
        assert_eq!(store.load().as_deref(), Some("test_jwt_abc123"));
        assert_eq!(store.source(), Some("file"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(store.path())
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        store.delete().expect("delete");
        assert!(store.load().is_none());
        store.delete().expect("deleting twice is fine");
    }

    #[test]
    fn file_store_ignores_whitespace_content() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        fs::write(&path, "   \n  ").expect("write");
        assert!(FileTokenStore::new(path).load().is_none());
    }

    #[test]
    fn memory_store_cycle() {
        let store = MemoryTokenStore::default();
        assert!(store.load().is_none());
        store.store("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));
        store.delete().unwrap();
        assert!(store.source().is_none());
    }
}
