//! Tracks the one active session per (channel, game kind).
//!
//! This replaces the process-wide map of active games with an explicit
//! object callers pass around, so tests can run several independent
//! registries side by side. Lookups are keyed by channel id; the map-level
//! lock is the only cross-session synchronization — each session handle
//! carries its own mutex so events on one game are processed one at a time.

use crate::engine::{ChannelId, GameKind, Session};
use crate::error::GameError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// A live session, locked per-event by the adapter.
pub type SessionHandle = Arc<Mutex<Box<dyn Session>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SessionKey {
    kind: GameKind,
    channel: ChannelId,
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionKey, SessionHandle, ahash::RandomState>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::default()),
        }
    }

    /// Registers a new session. Fails with `AlreadyActive` if the channel
    /// already hosts a game of the same kind.
    pub async fn start(&self, session: Box<dyn Session>) -> Result<SessionHandle, GameError> {
        let key = SessionKey {
            kind: session.kind(),
            channel: session.channel(),
        };
        let mut map = self.sessions.write().await;
        if map.contains_key(&key) {
            return Err(GameError::AlreadyActive(key.kind));
        }
        let handle: SessionHandle = Arc::new(Mutex::new(session));
        map.insert(key, handle.clone());
        tracing::info!(target: "registry", kind = %key.kind, channel = %key.channel, "session started");
        Ok(handle)
    }

    pub async fn get(&self, kind: GameKind, channel: ChannelId) -> Option<SessionHandle> {
        let key = SessionKey { kind, channel };
        self.sessions.read().await.get(&key).cloned()
    }

    /// Removes a session. Called exactly once per session in the happy
    /// path, but double-removal (completion racing an idle sweep) is a
    /// deliberate no-op.
    pub async fn end(&self, kind: GameKind, channel: ChannelId) {
        let key = SessionKey { kind, channel };
        if self.sessions.write().await.remove(&key).is_some() {
            tracing::info!(target: "registry", kind = %kind, channel = %channel, "session ended");
        }
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Evicts sessions idle longer than `ttl`. Sessions currently handling
    /// an event are skipped and caught on the next sweep.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut map = self.sessions.write().await;
        let mut stale = Vec::new();
        for (key, handle) in map.iter() {
            if let Ok(session) = handle.try_lock() {
                if session.idle_for() > ttl {
                    stale.push(*key);
                }
            }
        }
        for key in &stale {
            map.remove(key);
            tracing::info!(target: "registry", kind = %key.kind, channel = %key.channel, "idle session evicted");
        }
        stale.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
