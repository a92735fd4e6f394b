// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-message engagement pipeline.
//!
//! One [`Engine`] owns the session store, the scorer, the state machine,
//! and the correlation graph, and drives each inbound message through
//! detect → respond → merge → correlate → transition → report. Collaborator
//! failures degrade (fallback reply, skipped delivery) rather than failing
//! the message; the caller always gets a well-formed outcome.

use std::sync::Arc;

use chrono::Utc;
use lure_core::error::LureError;
use lure_core::traits::{Responder, ReportSink};
use lure_core::types::{DetectionResult, Message, Sender, SessionId};
use lure_detect::score::ConfidenceScorer;
use lure_engage::{SessionStore, SessionView, StateMachine};
use lure_graph::{CaseArtifacts, CaseReport, CorrelationGraph, GraphStatistics};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::report::build_final_report;

/// What one processed message produced.
#[derive(Debug, Clone)]
pub struct EngagementOutcome {
    /// The agent's outbound reply text.
    pub reply: String,
    /// Detection result for the inbound message.
    pub detection: DetectionResult,
    /// Session standing after this message.
    pub session: SessionView,
    /// Whether a final report was delivered during this call.
    pub report_sent: bool,
}

/// The engagement engine. Cheap to share behind an `Arc`; every method
/// takes `&self`.
pub struct Engine {
    config: EngineConfig,
    store: SessionStore,
    scorer: ConfidenceScorer,
    state_machine: StateMachine,
    graph: CorrelationGraph,
    responder: Arc<dyn Responder>,
    sink: Arc<dyn ReportSink>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        responder: Arc<dyn Responder>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        let scorer = ConfidenceScorer::adaptive(config.regional_fraud_prevalence);
        let state_machine = StateMachine::new(config.thresholds.clone());
        info!(
            threshold = scorer.threshold(),
            enhanced_risk = config.use_enhanced_risk,
            "engine initialized"
        );
        Self {
            config,
            store: SessionStore::new(),
            scorer,
            state_machine,
            graph: CorrelationGraph::new(),
            responder,
            sink,
        }
    }

    /// Process one inbound message for `session_id`, creating the session
    /// on first use.
    ///
    /// Once a session has exited with fraud confirmed, every further call
    /// re-attempts report delivery until the host deletes the session.
    pub async fn process_message(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<EngagementOutcome, LureError> {
        let session = self.store.get_or_create(session_id);
        let mut session = session.lock().await;

        // Score against prior turns only; the new message is its subject.
        let detection = self.scorer.detect(text, &session.history);
        session.push_message(Message::new(
            Sender::Subject,
            text,
            Utc::now().timestamp_millis(),
        ));

        let reply = match self
            .responder
            .respond(session.state, &session.history, &detection)
            .await
        {
            Ok(reply) => reply,
            Err(error) => {
                warn!(session_id = %session_id, %error, "responder failed, using fallback reply");
                self.config.fallback_reply.clone()
            }
        };
        session.push_message(Message::new(
            Sender::Agent,
            reply.clone(),
            Utc::now().timestamp_millis(),
        ));

        session.intelligence.merge(&detection.extracted, &detection.reasons);

        if detection.detected {
            session.scam_detected = true;
            // One detection note per category keeps notes bounded: sessions
            // stay alive for intelligence after exit, and every category and
            // transition can contribute at most once.
            if let Some(category) = &detection.dominant_category {
                let tag = format!("Detected {category} scam");
                if !session.notes.iter().any(|n| n.starts_with(&tag)) {
                    session
                        .notes
                        .push(format!("{tag} (confidence: {:.2})", detection.score));
                }
            }
            self.graph.record_case(
                session_id.as_str(),
                &CaseArtifacts {
                    payment_handles: detection.extracted.payment_handles.iter().cloned().collect(),
                    phone_numbers: detection.extracted.phone_numbers.iter().cloned().collect(),
                    urls: detection.extracted.urls.iter().cloned().collect(),
                },
                &detection.categories.iter().cloned().collect::<Vec<_>>(),
            );
        }

        let next = self
            .state_machine
            .next_state(session.state, session.message_count(), &session.intelligence);
        session.apply_transition(next);

        let mut report_sent = false;
        if self
            .state_machine
            .should_report(session.state, session.scam_detected, session.message_count())
        {
            let report = build_final_report(
                &session,
                self.config.report_artifact_cap,
                self.config.report_keyword_cap,
            );
            let delivery_id = Uuid::new_v4();
            match self.sink.deliver(&report).await {
                Ok(()) => {
                    info!(session_id = %session_id, %delivery_id, "final report delivered");
                    report_sent = true;
                }
                Err(error) => {
                    warn!(session_id = %session_id, %delivery_id, %error, "report delivery failed");
                }
            }
        }

        Ok(EngagementOutcome {
            reply,
            detection,
            session: session.snapshot(),
            report_sent,
        })
    }

    /// Current standing of an existing session.
    pub async fn session_status(&self, session_id: &SessionId) -> Result<SessionView, LureError> {
        match self.store.get(session_id) {
            Some(session) => Ok(session.lock().await.snapshot()),
            None => Err(LureError::SessionNotFound {
                session_id: session_id.to_string(),
            }),
        }
    }

    /// Drop a session after its report has been handled. Returns whether a
    /// session was removed.
    pub fn delete_session(&self, session_id: &SessionId) -> bool {
        self.store.remove(session_id)
    }

    /// Ids of all live sessions.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.store.session_ids()
    }

    /// Correlation report for one session's case, using the configured
    /// risk model.
    pub fn case_report(&self, session_id: &SessionId) -> CaseReport {
        self.graph.case_report(
            session_id.as_str(),
            self.config.use_enhanced_risk,
            &self.config.risk_multipliers,
        )
    }

    /// Aggregate correlation-graph statistics.
    pub fn graph_statistics(&self) -> GraphStatistics {
        self.graph.statistics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lure_core::report::FinalReport;
    use lure_core::types::EngagementState;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    struct EchoResponder;

    #[async_trait]
    impl Responder for EchoResponder {
        async fn respond(
            &self,
            state: EngagementState,
            _history: &[Message],
            _detection: &DetectionResult,
        ) -> Result<String, LureError> {
            Ok(format!("({state}) oh really? tell me more"))
        }
    }

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        async fn respond(
            &self,
            _state: EngagementState,
            _history: &[Message],
            _detection: &DetectionResult,
        ) -> Result<String, LureError> {
            Err(LureError::Responder {
                message: "backend unreachable".into(),
                source: None,
            })
        }
    }

    #[derive(Default)]
    struct CapturingSink {
        reports: Mutex<Vec<FinalReport>>,
    }

    #[async_trait]
    impl ReportSink for CapturingSink {
        async fn deliver(&self, report: &FinalReport) -> Result<(), LureError> {
            self.reports.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    fn engine_with(responder: Arc<dyn Responder>, sink: Arc<dyn ReportSink>) -> Engine {
        Engine::new(EngineConfig::default(), responder, sink)
    }

    #[tokio::test]
    async fn benign_message_creates_session_without_detection() {
        let engine = engine_with(Arc::new(EchoResponder), Arc::new(CapturingSink::default()));
        let id = SessionId("wa-1".into());
        let outcome = engine.process_message(&id, "hello, who is this?").await.unwrap();

        assert!(!outcome.detection.detected);
        assert!(!outcome.session.scam_detected);
        assert_eq!(outcome.session.message_count, 2);
        assert!(outcome.reply.contains("tell me more"));
        assert!(!outcome.report_sent);
    }

    #[tokio::test]
    async fn scam_message_marks_session_and_graph() {
        let engine = engine_with(Arc::new(EchoResponder), Arc::new(CapturingSink::default()));
        let id = SessionId("wa-2".into());
        let outcome = engine
            .process_message(&id, "urgent! pay to fraud@ybl now or account blocked")
            .await
            .unwrap();

        assert!(outcome.detection.detected);
        assert!(outcome.session.scam_detected);
        assert!(outcome.session.intelligence.payment_handles.contains("fraud@ybl"));
        assert_eq!(engine.graph.risk_score("fraud@ybl"), 1);
        assert!(engine.case_report(&id).total_linked_artifacts >= 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn responder_failure_degrades_to_fallback_reply() {
        let engine = engine_with(Arc::new(FailingResponder), Arc::new(CapturingSink::default()));
        let id = SessionId("wa-3".into());
        let outcome = engine.process_message(&id, "hello").await.unwrap();

        assert_eq!(outcome.reply, EngineConfig::default().fallback_reply);
        assert_eq!(outcome.session.message_count, 2);
        assert!(logs_contain("responder failed"));
    }

    #[tokio::test]
    async fn session_status_unknown_id_is_an_error() {
        let engine = engine_with(Arc::new(EchoResponder), Arc::new(CapturingSink::default()));
        let err = engine
            .session_status(&SessionId("missing".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, LureError::SessionNotFound { session_id } if session_id == "missing"));
    }

    #[tokio::test]
    async fn delete_session_removes_it() {
        let engine = engine_with(Arc::new(EchoResponder), Arc::new(CapturingSink::default()));
        let id = SessionId("wa-4".into());
        engine.process_message(&id, "hi").await.unwrap();

        assert!(engine.delete_session(&id));
        assert!(!engine.delete_session(&id));
        assert!(engine.session_status(&id).await.is_err());
    }

    #[tokio::test]
    async fn post_exit_detections_do_not_grow_notes() {
        let engine = engine_with(Arc::new(EchoResponder), Arc::new(CapturingSink::default()));
        let id = SessionId("wa-7".into());
        let text = "urgent! pay to fraud@ybl now or account blocked";

        let mut notes_at_exit = None;
        for _ in 0..30 {
            let outcome = engine.process_message(&id, text).await.unwrap();
            if outcome.session.state == EngagementState::Exit && notes_at_exit.is_none() {
                notes_at_exit = Some(outcome.session.notes.len());
            }
        }

        let final_notes = engine.session_status(&id).await.unwrap().notes;
        assert_eq!(Some(final_notes.len()), notes_at_exit);
        assert_eq!(
            final_notes.iter().filter(|n| n.starts_with("Detected")).count(),
            1
        );
    }

    #[tokio::test]
    async fn handle_reuse_across_sessions_elevates_priority() {
        let engine = engine_with(Arc::new(EchoResponder), Arc::new(CapturingSink::default()));
        let text = "urgent! pay to fraud@ybl now or account blocked";
        let a = SessionId("wa-5".into());
        let b = SessionId("wa-6".into());
        engine.process_message(&a, text).await.unwrap();
        engine.process_message(&b, text).await.unwrap();

        assert_eq!(engine.graph.risk_score("fraud@ybl"), 2);
        assert_eq!(
            engine.case_report(&a).priority,
            lure_graph::CasePriority::High
        );
    }
}
