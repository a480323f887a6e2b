use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// In-memory session token state.
///
/// Holds at most one backend session token at a time. The token lives only
/// in process memory: it is created by a login exchange or signup, read by
/// every authenticated request, and dropped on logout or when the backend
/// answers 401. There is no local expiry tracking; invalidation is reactive.
///
/// Clones share state, so a cloned client sees the same token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    // Serializes login exchanges: concurrent callers that all find the token
    // absent queue here, and re-check after acquiring the guard, so a single
    // invalidation triggers exactly one exchange.
    exchange: Arc<Mutex<()>>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current session token, if one is held.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Returns true when a session token is held.
    pub async fn is_active(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Stores a newly exchanged session token, replacing any previous one.
    pub async fn set_token(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    /// Drops the session token.
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    /// Acquires the exclusive right to run a login exchange.
    ///
    /// Callers must re-check [`Session::is_active`] after acquiring the
    /// guard; another caller may have completed the exchange while they
    /// waited.
    pub(crate) async fn exchange_guard(&self) -> MutexGuard<'_, ()> {
        self.exchange.lock().await
    }
}
