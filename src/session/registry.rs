//! In-memory registry of active sessions

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::{Session, SessionKind};
use crate::{Error, Result};

/// Registry of active sessions keyed by caller-supplied id
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<i32, Session>,
}

impl SessionRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session under `id`
    ///
    /// # Errors
    ///
    /// Returns error if a session with this id is already active
    pub fn open(&mut self, id: i32, kind: SessionKind) -> Result<Session> {
        if self.sessions.contains_key(&id) {
            return Err(Error::DuplicateSession(id));
        }

        let session = Session::with_kind(id, kind);
        self.sessions.insert(id, session.clone());
        tracing::info!(session_id = id, kind = %kind, "session opened");
        Ok(session)
    }

    /// Snapshot of an active session
    #[must_use]
    pub fn get(&self, id: i32) -> Option<Session> {
        self.sessions.get(&id).cloned()
    }

    /// Record activity on a session; the latest write wins
    ///
    /// # Errors
    ///
    /// Returns error if no session with this id is active
    pub fn touch(&mut self, id: i32, timestamp: DateTime<Utc>) -> Result<()> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(Error::SessionNotFound(id))?;
        session.touch(timestamp);
        Ok(())
    }

    /// Close a session, returning its final state
    pub fn close(&mut self, id: i32) -> Option<Session> {
        let removed = self.sessions.remove(&id);
        if removed.is_some() {
            tracing::info!(session_id = id, "session closed");
        }
        removed
    }

    /// Remove sessions idle for longer than `max_idle`, returning their ids
    pub fn expire_idle(&mut self, now: DateTime<Utc>, max_idle: Duration) -> Vec<i32> {
        let mut expired: Vec<i32> = self
            .sessions
            .values()
            .filter(|s| s.idle_for(now) > max_idle)
            .map(Session::id)
            .collect();
        expired.sort_unstable();

        for id in &expired {
            self.sessions.remove(id);
        }
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "expired idle sessions");
        }
        expired
    }

    /// Number of active sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
