//! Tier ordering of the layered token store.
//!
//! Uses `figment::Jail` to sandbox `LINKHUB_AUTH__TOKEN`. The keyring service
//! name is unique to the test so no real credentials are read or written.

use hub_auth::{FileTokenStore, KeyringTokenStore, TokenStore};

#[test]
fn env_token_is_used_when_keyring_is_empty() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("LINKHUB_AUTH__TOKEN", "env-token");
        let file = FileTokenStore::new(jail.directory().join("credentials"));
        let store = KeyringTokenStore::new("linkhub-cli-test-env", file);

        assert_eq!(store.load().as_deref(), Some("env-token"));
        assert_eq!(store.source(), Some("env"));
        Ok(())
    });
}

#[test]
fn file_tier_is_last() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("LINKHUB_AUTH__TOKEN", "");
        let file = FileTokenStore::new(jail.directory().join("credentials"));
        file.store("file-token").expect("file store");
        let store = KeyringTokenStore::new("linkhub-cli-test-file", file);

        assert_eq!(store.load().as_deref(), Some("file-token"));
        assert_eq!(store.source(), Some("file"));
        Ok(())
    });
}
