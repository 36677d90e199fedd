// Session store - snapshot and size helpers are for tests and diagnostics
#![allow(dead_code)]

//! Session-id-keyed storage for active wish sessions.

use dashmap::DashMap;

use jinni_domain::WishSession;

/// Owns all live game sessions, keyed by the caller-supplied session id.
///
/// Sessions are logically independent; there is no cross-session
/// coordination. If two requests race on the same id the last write wins,
/// which is the documented (not defended) behavior for e.g. two browser
/// tabs sharing a session.
#[derive(Default)]
pub struct WishSessionStore {
    sessions: DashMap<String, WishSession>,
}

impl WishSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Insert a fresh session, replacing any existing one for this id.
    pub fn insert(&self, session_id: &str, session: WishSession) {
        self.sessions.insert(session_id.to_string(), session);
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Run `f` against the session under the map's shard lock.
    ///
    /// Returns `None` when no session exists for this id. Callers must not
    /// block or await inside `f`.
    pub fn with_mut<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut WishSession) -> R,
    ) -> Option<R> {
        self.sessions
            .get_mut(session_id)
            .map(|mut entry| f(entry.value_mut()))
    }

    /// Clone the current session state, mainly for tests and diagnostics.
    pub fn snapshot(&self, session_id: &str) -> Option<WishSession> {
        self.sessions.get(session_id).map(|entry| entry.clone())
    }

    /// Remove the session. Idempotent.
    pub fn remove(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
