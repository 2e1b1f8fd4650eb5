//! Caller sessions
//!
//! A session is one caller's interaction window. Uniqueness of ids and
//! expiry are the registry's concern, not the session's

pub mod registry;

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub use registry::SessionRegistry;

/// What a session was opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Invoking actions
    Action,
    /// Querying node information
    Info,
    /// Anything else
    #[default]
    Other,
}

impl SessionKind {
    /// String representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Info => "info",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked caller interaction window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: i32,
    kind: SessionKind,
    started_at: DateTime<Utc>,
    last_active_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Start a session of kind [`SessionKind::Other`]
    #[must_use]
    pub fn new(id: i32) -> Self {
        Self::with_kind(id, SessionKind::Other)
    }

    /// Start a session of the given kind
    #[must_use]
    pub fn with_kind(id: i32, kind: SessionKind) -> Self {
        Self {
            id,
            kind,
            started_at: Utc::now(),
            last_active_at: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Last time the caller was heard from, `None` before the first touch
    #[must_use]
    pub const fn last_active_at(&self) -> Option<DateTime<Utc>> {
        self.last_active_at
    }

    /// Record activity at `timestamp`
    ///
    /// The timestamp is stored as given; ordering against `started_at` is
    /// the writer's responsibility
    pub const fn touch(&mut self, timestamp: DateTime<Utc>) {
        self.last_active_at = Some(timestamp);
    }

    /// Record activity now
    pub fn touch_now(&mut self) {
        self.touch(Utc::now());
    }

    /// Time since the last activity, or since start if never touched
    #[must_use]
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_active_at.unwrap_or(self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_defaults() {
        let session = Session::with_kind(42, SessionKind::Info);

        assert_eq!(session.id(), 42);
        assert_eq!(session.kind(), SessionKind::Info);
        assert!(session.last_active_at().is_none());
    }

    #[test]
    fn default_kind_is_other() {
        assert_eq!(Session::new(1).kind(), SessionKind::Other);
    }

    #[test]
    fn touch_sets_exact_timestamp_and_keeps_start() {
        let mut session = Session::new(7);
        let started = session.started_at();

        let first = started + Duration::seconds(5);
        session.touch(first);
        assert_eq!(session.last_active_at(), Some(first));

        let second = started + Duration::seconds(90);
        session.touch(second);
        session.touch(second);
        assert_eq!(session.last_active_at(), Some(second));
        assert_eq!(session.started_at(), started);
    }

    #[test]
    fn touch_accepts_earlier_timestamps() {
        let mut session = Session::new(7);
        let earlier = session.started_at() - Duration::seconds(10);

        session.touch(earlier);
        assert_eq!(session.last_active_at(), Some(earlier));
    }

    #[test]
    fn idle_measured_from_last_activity() {
        let mut session = Session::new(3);
        let start = session.started_at();

        assert_eq!(session.idle_for(start + Duration::seconds(30)), Duration::seconds(30));

        session.touch(start + Duration::seconds(20));
        assert_eq!(session.idle_for(start + Duration::seconds(30)), Duration::seconds(10));
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&SessionKind::Action).unwrap();
        assert_eq!(json, "\"action\"");
    }
}
