//! Bridge from session notifications to the controller.
//!
//! Session handlers are synchronous while the controller reacts with store
//! round-trips, so events are queued here and applied by whoever owns the
//! controller.

use hub_auth::{SessionEvent, SessionManager, Subscription};
use tokio::sync::mpsc;

use crate::controller::LinkController;
use crate::error::HubError;

/// Queued session transitions for one controller.
///
/// Dropping the feed unregisters it from the session manager.
#[derive(Debug)]
pub struct SessionFeed {
    events: mpsc::UnboundedReceiver<SessionEvent>,
    _subscription: Subscription,
}

impl SessionFeed {
    /// Start queueing every transition of `manager`.
    pub fn subscribe(manager: &SessionManager) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let subscription = manager.on_session_change(move |event| {
            if tx.send(event.clone()).is_err() {
                tracing::debug!("session feed closed; dropping event");
            }
        });
        Self {
            events,
            _subscription: subscription,
        }
    }

    /// Apply queued transitions in order and return how many were applied.
    ///
    /// # Errors
    ///
    /// Returns the first reload error; later events stay queued.
    pub async fn apply(&mut self, controller: &mut LinkController) -> Result<usize, HubError> {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            controller.handle_session_event(&event).await?;
            applied += 1;
        }
        Ok(applied)
    }
}
