//! Session state.
//!
//! # Data Flow
//! ```text
//! AuthStateSource (watch channel)
//!     → SessionHolder::observe (long-lived task)
//!     → ArcSwap<Option<User>> + loading flag
//!     → read by handlers through an explicitly passed Arc<SessionHolder>
//!
//! Teardown:
//!     shutdown broadcast or SessionSubscription::cleanup()
//!     → observer task exits
//! ```
//!
//! # Design Decisions
//! - One holder per process, injected rather than global
//! - Reads are lock-free snapshots
//! - `loading` only goes from true to false, on the first resolved state

pub mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

pub use source::{AuthState, AuthStateSource, ChannelAuthSource};

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Process-wide holder of the current user.
#[derive(Debug)]
pub struct SessionHolder {
    user: ArcSwap<Option<User>>,
    loading: AtomicBool,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self {
            user: ArcSwap::from_pointee(None),
            loading: AtomicBool::new(true),
        }
    }

    /// Snapshot of the current user.
    pub fn current(&self) -> Option<User> {
        (**self.user.load()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.load().is_some()
    }

    pub fn user_id(&self) -> Option<String> {
        self.current().map(|u| u.uid)
    }

    pub fn user_email(&self) -> Option<String> {
        self.current().and_then(|u| u.email)
    }

    pub fn user_display_name(&self) -> Option<String> {
        self.current().and_then(|u| u.display_name)
    }

    pub fn user_photo_url(&self) -> Option<String> {
        self.current().and_then(|u| u.photo_url)
    }

    /// True until the source reports its first resolved state.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    fn apply(&self, state: &AuthState) {
        if let AuthState::Resolved(user) = state {
            self.user.store(Arc::new(user.clone()));
            self.loading.store(false, Ordering::Release);
            tracing::info!(
                authenticated = user.is_some(),
                uid = user.as_ref().map(|u| u.uid.as_str()).unwrap_or("-"),
                "Auth state changed"
            );
        }
    }

    /// Subscribe to `source` until shutdown or cleanup.
    pub fn observe(
        self: &Arc<Self>,
        source: &dyn AuthStateSource,
        shutdown: broadcast::Receiver<()>,
    ) -> SessionSubscription {
        let rx = source.subscribe();
        let holder = Arc::clone(self);
        let task = tokio::spawn(run_observer(holder, rx, shutdown));
        SessionSubscription { task: Some(task) }
    }
}

impl Default for SessionHolder {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_observer(
    holder: Arc<SessionHolder>,
    mut rx: watch::Receiver<AuthState>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let state = rx.borrow_and_update().clone();
        holder.apply(&state);

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    tracing::debug!("Auth source closed, session observer exiting");
                    return;
                }
            }
            _ = shutdown.recv() => {
                tracing::info!("Session observer received shutdown signal");
                return;
            }
        }
    }
}

/// Handle to a running session observer.
#[derive(Debug)]
pub struct SessionSubscription {
    task: Option<JoinHandle<()>>,
}

impl SessionSubscription {
    /// Stop observing. Safe to call more than once.
    pub fn cleanup(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Session subscription cleaned up");
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ada() -> User {
        User {
            uid: "u-1".into(),
            email: Some("ada@example.com".into()),
            display_name: Some("Ada".into()),
            photo_url: None,
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_loading_until_resolved() {
        let holder = Arc::new(SessionHolder::new());
        let source = ChannelAuthSource::new();
        let (shutdown_tx, _) = broadcast::channel(1);
        let _sub = holder.observe(&source, shutdown_tx.subscribe());

        settle().await;
        assert!(holder.is_loading());
        assert!(!holder.is_authenticated());

        source.publish(Some(ada()));
        settle().await;
        assert!(!holder.is_loading());
        assert!(holder.is_authenticated());
        assert_eq!(holder.user_id().as_deref(), Some("u-1"));
        assert_eq!(holder.user_email().as_deref(), Some("ada@example.com"));
        assert_eq!(holder.user_display_name().as_deref(), Some("Ada"));
        assert_eq!(holder.user_photo_url(), None);

        source.publish(None);
        settle().await;
        assert!(!holder.is_loading());
        assert!(!holder.is_authenticated());
    }

    #[tokio::test]
    async fn test_already_resolved_source() {
        let holder = Arc::new(SessionHolder::new());
        let source = ChannelAuthSource::signed_out();
        let (shutdown_tx, _) = broadcast::channel(1);
        let _sub = holder.observe(&source, shutdown_tx.subscribe());

        settle().await;
        assert!(!holder.is_loading());
        assert_eq!(holder.current(), None);
    }

    #[tokio::test]
    async fn test_cleanup_stops_updates() {
        let holder = Arc::new(SessionHolder::new());
        let source = ChannelAuthSource::signed_out();
        let (shutdown_tx, _) = broadcast::channel(1);
        let mut sub = holder.observe(&source, shutdown_tx.subscribe());
        settle().await;
        assert!(sub.is_active());

        sub.cleanup();
        sub.cleanup();
        settle().await;
        assert!(!sub.is_active());

        source.publish(Some(ada()));
        settle().await;
        assert!(!holder.is_authenticated());
    }

    #[tokio::test]
    async fn test_shutdown_ends_observer() {
        let holder = Arc::new(SessionHolder::new());
        let source = ChannelAuthSource::new();
        let (shutdown_tx, _) = broadcast::channel(1);
        let sub = holder.observe(&source, shutdown_tx.subscribe());
        settle().await;

        shutdown_tx.send(()).unwrap();
        settle().await;
        assert!(!sub.is_active());
    }
}
