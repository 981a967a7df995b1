//! Auth state sources.

use tokio::sync::watch;

use crate::session::User;

/// What the identity provider currently knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No answer yet.
    Pending,
    /// Signed in (`Some`) or signed out (`None`).
    Resolved(Option<User>),
}

/// Notification stream of auth state changes.
pub trait AuthStateSource: Send + Sync {
    /// A receiver whose current value is the latest known state.
    fn subscribe(&self) -> watch::Receiver<AuthState>;
}

/// In-process auth source backed by a watch channel.
#[derive(Debug)]
pub struct ChannelAuthSource {
    tx: watch::Sender<AuthState>,
}

impl ChannelAuthSource {
    /// A source with no answer yet.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AuthState::Pending);
        Self { tx }
    }

    /// A source that already knows nobody is signed in.
    pub fn signed_out() -> Self {
        let (tx, _) = watch::channel(AuthState::Resolved(None));
        Self { tx }
    }

    /// Report a sign-in (`Some`) or sign-out (`None`).
    pub fn publish(&self, user: Option<User>) {
        self.tx.send_replace(AuthState::Resolved(user));
    }
}

impl Default for ChannelAuthSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStateSource for ChannelAuthSource {
    fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }
}
