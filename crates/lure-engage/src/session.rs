// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sessions and the process-wide session store.
//!
//! Each session's mutable state is guarded by its own `tokio::sync::Mutex`,
//! so concurrent messages for the same session serialize while distinct
//! sessions proceed fully in parallel. The store itself is a `DashMap`
//! keyed by the opaque external session id.

use std::sync::Arc;

use dashmap::DashMap;
use lure_core::types::{EngagementState, Message, SessionId};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::intelligence::SessionIntelligence;

/// One engagement with one counterparty. Lives for the process lifetime
/// or until explicitly deleted after reporting.
#[derive(Debug)]
pub struct Session {
    pub session_id: SessionId,
    pub state: EngagementState,
    pub history: Vec<Message>,
    pub intelligence: SessionIntelligence,
    pub scam_detected: bool,
    pub notes: Vec<String>,
}

impl Session {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            state: EngagementState::Hooked,
            history: Vec::new(),
            intelligence: SessionIntelligence::default(),
            scam_detected: false,
            notes: Vec::new(),
        }
    }

    /// Turns exchanged so far, both sides counted.
    pub fn message_count(&self) -> usize {
        self.history.len()
    }

    pub fn push_message(&mut self, message: Message) {
        self.history.push(message);
    }

    /// Move to `next` if it differs from the current state, recording a
    /// transition note. Regression is the state machine's concern; this
    /// method only applies its decision.
    pub fn apply_transition(&mut self, next: EngagementState) {
        if next == self.state {
            return;
        }
        info!(
            session_id = %self.session_id,
            from = %self.state,
            to = %next,
            message_count = self.message_count(),
            "engagement state transition"
        );
        self.notes.push(format!(
            "Transitioned to {next} at message {}",
            self.message_count()
        ));
        self.state = next;
    }

    /// Read-only snapshot handed back to the transport.
    pub fn snapshot(&self) -> SessionView {
        SessionView {
            session_id: self.session_id.clone(),
            state: self.state,
            message_count: self.message_count(),
            scam_detected: self.scam_detected,
            intelligence: self.intelligence.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Serializable view of a session's current standing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub state: EngagementState,
    pub message_count: usize,
    pub scam_detected: bool,
    pub intelligence: SessionIntelligence,
    pub notes: Vec<String>,
}

/// Concurrency-safe map of live sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Arc<Mutex<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch an existing session or create one in the hooked state.
    pub fn get_or_create(&self, session_id: &SessionId) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(session_id.clone())
            .or_insert_with(|| {
                debug!(session_id = %session_id, "created new session");
                Arc::new(Mutex::new(Session::new(session_id.clone())))
            })
            .clone()
    }

    /// Fetch without creating; `None` for unknown ids.
    pub fn get(&self, session_id: &SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get(session_id).map(|e| e.clone())
    }

    /// Drop a session after its report has been delivered. Returns whether
    /// anything was removed.
    pub fn remove(&self, session_id: &SessionId) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            info!(session_id = %session_id, "deleted session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Ids of all live sessions.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lure_core::types::Sender;

    #[test]
    fn new_session_starts_hooked_and_empty() {
        let s = Session::new(SessionId("s1".into()));
        assert_eq!(s.state, EngagementState::Hooked);
        assert_eq!(s.message_count(), 0);
        assert!(!s.scam_detected);
        assert!(s.notes.is_empty());
    }

    #[test]
    fn transition_appends_note_once() {
        let mut s = Session::new(SessionId("s1".into()));
        s.push_message(Message::new(Sender::Subject, "hi", 0));
        s.push_message(Message::new(Sender::Agent, "hello", 1));

        s.apply_transition(EngagementState::Confused);
        assert_eq!(s.state, EngagementState::Confused);
        assert_eq!(s.notes, vec!["Transitioned to confused at message 2"]);

        // Same-state application is a no-op.
        s.apply_transition(EngagementState::Confused);
        assert_eq!(s.notes.len(), 1);
    }

    #[test]
    fn store_returns_same_session_for_same_id() {
        let store = SessionStore::new();
        let id = SessionId("wa-1".into());
        let a = store.get_or_create(&id);
        let b = store.get_or_create(&id);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_id_is_none_until_created() {
        let store = SessionStore::new();
        let id = SessionId("missing".into());
        assert!(store.get(&id).is_none());
        store.get_or_create(&id);
        assert!(store.get(&id).is_some());
    }

    #[test]
    fn remove_reports_whether_present() {
        let store = SessionStore::new();
        let id = SessionId("s1".into());
        store.get_or_create(&id);
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_messages_for_one_session_serialize() {
        let store = Arc::new(SessionStore::new());
        let id = SessionId("busy".into());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let session = store.get_or_create(&id);
                let mut guard = session.lock().await;
                let n = guard.message_count() as i64;
                guard.push_message(Message::new(Sender::Subject, format!("m{i}"), n));
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let session = store.get(&id).unwrap();
        assert_eq!(session.lock().await.message_count(), 16);
        assert_eq!(store.len(), 1);
    }
}
