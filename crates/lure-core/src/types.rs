// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Lure workspace.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for an engagement session (opaque external key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the conversation a message came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The counterparty being engaged (the suspected scammer).
    Subject,
    /// The engine's own persona.
    Agent,
}

/// A single conversation turn. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Arrival time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp,
        }
    }
}

/// Typed, deduplicated artifacts pulled out of a single message.
///
/// All values are case-normalized where applicable: payment handles and
/// emails are lower-cased, phone and account numbers are digit-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArtifacts {
    /// Bank-account-shaped digit groups (format-only signal).
    pub bank_accounts: BTreeSet<String>,
    /// `local-part@provider` payment identifiers.
    pub payment_handles: BTreeSet<String>,
    /// Digit-only phone numbers with country prefix.
    pub phone_numbers: BTreeSet<String>,
    /// Scheme-prefixed links.
    pub urls: BTreeSet<String>,
    /// Email addresses.
    pub emails: BTreeSet<String>,
    /// Tax-ID-style identifiers (alphanumeric with checksum shape).
    pub tax_ids: BTreeSet<String>,
    /// National-ID-style identifiers (12 digits, separators stripped).
    pub national_ids: BTreeSet<String>,
    /// Names of the signal categories/patterns that fired.
    pub matched_keywords: BTreeSet<String>,
}

impl ExtractedArtifacts {
    /// True when no artifact of any category was found.
    pub fn is_empty(&self) -> bool {
        self.bank_accounts.is_empty()
            && self.payment_handles.is_empty()
            && self.phone_numbers.is_empty()
            && self.urls.is_empty()
            && self.emails.is_empty()
            && self.tax_ids.is_empty()
            && self.national_ids.is_empty()
            && self.matched_keywords.is_empty()
    }
}

/// Coarse risk level derived from a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a confidence score to a risk level.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            RiskLevel::High
        } else if score >= 0.4 {
            RiskLevel::Medium
        } else if score >= 0.3 {
            RiskLevel::Low
        } else {
            RiskLevel::None
        }
    }
}

/// The outcome of scoring one message. Produced fresh per message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Confidence in [0, 1], rounded to two decimals.
    pub score: f64,
    /// True iff `score` exceeds the active detection threshold.
    pub detected: bool,
    /// Human-readable trigger descriptions, strongest first, capped.
    pub reasons: Vec<String>,
    /// Fraud categories that matched at least once.
    pub categories: BTreeSet<String>,
    /// The category with the most matches, when any matched.
    pub dominant_category: Option<String>,
    /// Artifacts extracted from the same message.
    pub extracted: ExtractedArtifacts,
}

impl DetectionResult {
    /// Risk level for this detection.
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score)
    }
}

/// The six-phase engagement lifecycle.
///
/// The canonical order is `Hooked < Confused < Trusting < Delay < Extract
/// < Exit`. Sessions only ever move forward through this order; any state
/// may jump directly to `Exit`, and `Exit` is absorbing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EngagementState {
    /// Show interest, appear worried.
    Hooked,
    /// Ask naive questions.
    Confused,
    /// Appear willing, share fake info.
    Trusting,
    /// Create technical difficulties.
    Delay,
    /// Try to get the counterparty's details.
    Extract,
    /// Safely disengage. Terminal.
    Exit,
}

impl EngagementState {
    /// All states in canonical order.
    pub const ORDER: [EngagementState; 6] = [
        EngagementState::Hooked,
        EngagementState::Confused,
        EngagementState::Trusting,
        EngagementState::Delay,
        EngagementState::Extract,
        EngagementState::Exit,
    ];

    /// The next state in canonical order, or `None` from `Exit`.
    pub fn next(self) -> Option<EngagementState> {
        let idx = Self::ORDER.iter().position(|s| *s == self)?;
        Self::ORDER.get(idx + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self == EngagementState::Exit
    }
}
