use std::sync::Arc;

use anyhow::Context;
use hub_auth::{KeyringTokenStore, SessionManager, SupabaseAuth};
use hub_config::HubConfig;
use hub_core::identity::SessionContext;
use hub_store::{LinkStore, PostgrestStore};
use hub_view::{ExportTarget, LinkController, SessionFeed};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: HubConfig,
    pub session: SessionManager,
    pub controller: LinkController,
    feed: SessionFeed,
}

impl AppContext {
    /// Connect to the store, restore any saved session, and load the list.
    ///
    /// Fails with the setup notice when the store is not configured.
    pub async fn init(config: HubConfig) -> anyhow::Result<Self> {
        let supabase = config.require_store()?;
        let store = PostgrestStore::new(
            supabase.rest_url(),
            &supabase.anon_key,
            config.store.timeout(),
        )
        .context("failed to build store client")?;
        let store: Arc<dyn LinkStore> = Arc::new(store);

        let session = session_manager(&config)?;
        let mut feed = SessionFeed::subscribe(&session);
        if let Err(error) = session.rehydrate().await {
            tracing::warn!(%error, "could not restore session; continuing signed out");
        }

        let mut controller = LinkController::new(
            store,
            SessionContext::anonymous(),
            ExportTarget::from(&config.general),
        );
        if feed.apply(&mut controller).await? == 0 {
            controller.load().await?;
        }

        Ok(Self {
            config,
            session,
            controller,
            feed,
        })
    }

    /// Let the controller follow any session transitions since the last call.
    pub async fn sync_session(&mut self) -> anyhow::Result<()> {
        self.feed.apply(&mut self.controller).await?;
        Ok(())
    }
}

/// The session manager over the Supabase auth API and the system token store.
pub fn session_manager(config: &HubConfig) -> anyhow::Result<SessionManager> {
    let supabase = config.require_store()?;
    let gateway = SupabaseAuth::new(
        supabase.auth_url(),
        &supabase.anon_key,
        config.store.timeout(),
    )
    .context("failed to build auth client")?;
    let tokens = KeyringTokenStore::system().context("failed to open token store")?;

    Ok(
        SessionManager::new(Arc::new(gateway), Arc::new(tokens))
            .with_redirect_url(config.auth.redirect().map(str::to_string)),
    )
}
