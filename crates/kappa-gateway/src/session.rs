//! Registry of connected sessions
//!
//! A session lives from WebSocket upgrade to disconnect and carries no scoring
//! state. Removal is tied to [`SessionGuard`] being dropped, so abrupt
//! disconnects and handler panics clean up the same way a close frame does.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Session identifier - cheap to copy
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct SessionInfo {
    pub peer: Option<SocketAddr>,
    pub connected_at: DateTime<Utc>,
}

impl SessionInfo {
    /// Whole seconds since the session was registered.
    pub fn connected_secs(&self) -> i64 {
        (Utc::now() - self.connected_at).num_seconds().max(0)
    }
}

pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionInfo>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Add a session; it is removed again when the returned guard drops.
    pub fn register(self: &Arc<Self>, peer: Option<SocketAddr>) -> SessionGuard {
        let id = SessionId::new();
        self.sessions.insert(
            id,
            SessionInfo {
                peer,
                connected_at: Utc::now(),
            },
        );
        info!(
            session = %id,
            peer = ?peer,
            "Client connected. Total clients: {}",
            self.sessions.len()
        );
        SessionGuard {
            id,
            registry: Arc::clone(self),
        }
    }

    fn remove(&self, id: &SessionId) {
        if let Some((_, session)) = self.sessions.remove(id) {
            info!(
                session = %id,
                connected_secs = session.connected_secs(),
                "Client disconnected. Total clients: {}",
                self.sessions.len()
            );
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &SessionId) -> Option<SessionInfo> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn list(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }
}

/// Keeps a session registered for as long as it is alive.
pub struct SessionGuard {
    id: SessionId,
    registry: Arc<SessionRegistry>,
}

impl SessionGuard {
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_drop_removes_session() {
        let registry = Arc::new(SessionRegistry::new());
        let a = registry.register(None);
        let b = registry.register("127.0.0.1:9000".parse().ok());
        assert_eq!(registry.len(), 2);
        assert!(registry.get(&b.id()).unwrap().peer.is_some());

        drop(a);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list(), vec![b.id()]);

        drop(b);
        assert!(registry.is_empty());
    }

    #[test]
    fn connected_time_starts_near_zero() {
        let registry = Arc::new(SessionRegistry::new());
        let guard = registry.register(None);
        let info = registry.get(&guard.id()).unwrap();
        assert!(info.connected_secs() <= 1);
        assert!(info.connected_at <= Utc::now());
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
