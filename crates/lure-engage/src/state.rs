// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engagement lifecycle decisions.
//!
//! Transitions move forward through the canonical state order one step per
//! processed message, driven by cumulative message-count thresholds. Two
//! early-exit rules bound every engagement: enough financial artifacts
//! while in the extract phase, or the hard message cap, force an immediate
//! jump to exit from any state.

use lure_core::types::EngagementState;
use serde::{Deserialize, Serialize};

use crate::intelligence::SessionIntelligence;

/// Cumulative message-count thresholds per state. A state advances once
/// its own threshold is reached or exceeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StateThresholds {
    pub hooked: usize,
    pub confused: usize,
    pub trusting: usize,
    pub delay: usize,
    pub extract: usize,
    pub exit: usize,
}

impl Default for StateThresholds {
    fn default() -> Self {
        Self {
            hooked: 2,
            confused: 4,
            trusting: 7,
            delay: 10,
            extract: 14,
            exit: 18,
        }
    }
}

impl StateThresholds {
    fn for_state(&self, state: EngagementState) -> usize {
        match state {
            EngagementState::Hooked => self.hooked,
            EngagementState::Confused => self.confused,
            EngagementState::Trusting => self.trusting,
            EngagementState::Delay => self.delay,
            EngagementState::Extract => self.extract,
            EngagementState::Exit => self.exit,
        }
    }
}

/// Hard cap on total messages before a forced exit.
pub const HARD_MESSAGE_CAP: usize = 20;

/// Financial artifacts needed to leave the extract phase early.
pub const EARLY_EXIT_ARTIFACTS: usize = 2;

/// Minimum messages exchanged before a session qualifies for reporting.
pub const REPORT_MIN_MESSAGES: usize = 4;

/// Decides state transitions and report readiness.
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    thresholds: StateThresholds,
}

impl StateMachine {
    pub fn new(thresholds: StateThresholds) -> Self {
        Self { thresholds }
    }

    /// The state a session should be in after the latest message.
    ///
    /// At most one forward step per call; exit is absorbing and regression
    /// is impossible by construction.
    pub fn next_state(
        &self,
        current: EngagementState,
        message_count: usize,
        intelligence: &SessionIntelligence,
    ) -> EngagementState {
        if current.is_terminal() {
            return current;
        }
        if message_count >= HARD_MESSAGE_CAP {
            return EngagementState::Exit;
        }
        if current == EngagementState::Extract
            && intelligence.financial_artifact_count() >= EARLY_EXIT_ARTIFACTS
        {
            return EngagementState::Exit;
        }
        if message_count >= self.thresholds.for_state(current) {
            return current.next().unwrap_or(EngagementState::Exit);
        }
        current
    }

    /// Gate for final reporting: exited, fraud confirmed, and enough
    /// evidence exchanged to be worth reporting.
    pub fn should_report(
        &self,
        state: EngagementState,
        scam_detected: bool,
        message_count: usize,
    ) -> bool {
        state == EngagementState::Exit
            && scam_detected
            && message_count >= REPORT_MIN_MESSAGES
    }
}
