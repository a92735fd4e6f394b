// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-signal confidence scoring for fraud intent.
//!
//! Each categorized pattern match contributes a small fixed weight; strong
//! single-shot indicators (payment handles, account-shaped digits, ID
//! tokens) contribute larger fixed increments. Recent conversation history
//! adds an escalation boost when several of the counterparty's recent
//! turns were independently alarming. The final score is clamped to [0, 1]
//! and rounded to two decimals.

use std::collections::BTreeSet;

use lure_core::types::{DetectionResult, ExtractedArtifacts, Message, Sender};
use tracing::debug;

use crate::extract::EntityExtractor;
use crate::patterns::{FraudCategory, PatternLibrary};

/// Detection threshold used when no regional signal is available.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

const URL_WEIGHT: f64 = 0.3;
const PAYMENT_HANDLE_WEIGHT: f64 = 0.4;
const BANK_ACCOUNT_WEIGHT: f64 = 0.5;
const PHONE_WEIGHT: f64 = 0.2;
const ID_TOKEN_WEIGHT: f64 = 0.6;
const CAPS_WEIGHT: f64 = 0.2;
const EXCLAMATION_WEIGHT: f64 = 0.15;

/// Boost applied when more than one recent prior subject turn scored above
/// the threshold on its own.
const ESCALATION_BOOST: f64 = 0.2;
/// How many prior subject turns are rescored for escalation. The agent's
/// own replies never count toward the window.
const ESCALATION_WINDOW: usize = 3;

/// Reasons are capped at this many entries, generation order.
const REASON_CAP: usize = 5;

/// Select the active detection threshold from a regional fraud-prevalence
/// signal in [0, 1]. Higher-risk regions get more sensitive detection.
pub fn adapted_threshold(prevalence: Option<f64>) -> f64 {
    match prevalence {
        Some(p) if p > 0.40 => 0.25,
        Some(p) if p > 0.25 => 0.30,
        _ => DEFAULT_THRESHOLD,
    }
}

/// Scores messages against the pattern library.
pub struct ConfidenceScorer {
    library: &'static PatternLibrary,
    extractor: EntityExtractor,
    threshold: f64,
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidenceScorer {
    /// Scorer with the default threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    /// Scorer with an explicit threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            library: PatternLibrary::builtin(),
            extractor: EntityExtractor::new(),
            threshold,
        }
    }

    /// Scorer with the threshold adapted from a regional prevalence signal.
    pub fn adaptive(prevalence: Option<f64>) -> Self {
        Self::with_threshold(adapted_threshold(prevalence))
    }

    /// The active detection threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score `text` for fraud intent, using `history` (prior turns, oldest
    /// first) for the escalation boost. Only the counterparty's turns feed
    /// the escalation window; agent replies in the history are skipped.
    pub fn detect(&self, text: &str, history: &[Message]) -> DetectionResult {
        let (mut score, mut reasons, categories, dominant_category, extracted) =
            self.score_standalone(text);

        if !history.is_empty() {
            let alarming_turns = history
                .iter()
                .rev()
                .filter(|m| m.sender == Sender::Subject)
                .take(ESCALATION_WINDOW)
                .filter(|m| self.score_standalone(&m.text).0 > self.threshold)
                .count();
            if alarming_turns > 1 {
                score += ESCALATION_BOOST;
                reasons.push("escalation across recent messages".to_string());
            }
        }

        let score = round2(score.clamp(0.0, 1.0));
        let detected = score > self.threshold;
        reasons.truncate(REASON_CAP);

        debug!(
            score,
            detected,
            threshold = self.threshold,
            categories = categories.len(),
            "scored message"
        );

        DetectionResult {
            score,
            detected,
            reasons,
            categories,
            dominant_category,
            extracted,
        }
    }

    /// One message scored in isolation (no history), so the escalation pass
    /// cannot recurse.
    #[allow(clippy::type_complexity)]
    fn score_standalone(
        &self,
        text: &str,
    ) -> (f64, Vec<String>, BTreeSet<String>, Option<String>, ExtractedArtifacts) {
        let mut score = 0.0;
        let mut reasons = Vec::new();
        let mut categories = BTreeSet::new();
        let mut dominant: Option<(FraudCategory, usize)> = None;

        for signals in self.library.categories() {
            let mut hits = 0usize;
            for pattern in &signals.patterns {
                if pattern.is_match(text) {
                    score += signals.weight;
                    hits += 1;
                    reasons.push(format!(
                        "matched {} pattern: {}",
                        signals.category,
                        pattern.as_str()
                    ));
                }
            }
            if hits > 0 {
                categories.insert(signals.category.to_string());
                if dominant.is_none_or(|(_, best)| hits > best) {
                    dominant = Some((signals.category, hits));
                }
            }
        }

        let mut extracted = self.extractor.extract(text);
        extracted.matched_keywords = categories.clone();

        if !extracted.urls.is_empty() {
            score += URL_WEIGHT;
            let sample: Vec<&str> = extracted.urls.iter().take(2).map(String::as_str).collect();
            reasons.push(format!(
                "found {} url(s): {}",
                extracted.urls.len(),
                sample.join(", ")
            ));
        }
        if !extracted.payment_handles.is_empty() {
            score += PAYMENT_HANDLE_WEIGHT;
            let handles: Vec<&str> =
                extracted.payment_handles.iter().map(String::as_str).collect();
            reasons.push(format!("found payment handle(s): {}", handles.join(", ")));
        }
        if !extracted.bank_accounts.is_empty() {
            score += BANK_ACCOUNT_WEIGHT;
            reasons.push("found bank-account-shaped digits".to_string());
        }
        if !extracted.phone_numbers.is_empty() {
            score += PHONE_WEIGHT;
            reasons.push("found phone number(s)".to_string());
        }
        if !extracted.tax_ids.is_empty() {
            score += ID_TOKEN_WEIGHT;
            reasons.push("found tax-id-shaped token(s)".to_string());
        }
        if !extracted.national_ids.is_empty() {
            score += ID_TOKEN_WEIGHT;
            reasons.push("found national-id-shaped token(s)".to_string());
        }

        let char_count = text.chars().count();
        if char_count > 10 {
            let caps = text.chars().filter(|c| c.is_uppercase()).count();
            let ratio = caps as f64 / char_count as f64;
            if ratio > 0.4 {
                score += CAPS_WEIGHT;
                reasons.push(format!("high capitalization ratio: {:.0}%", ratio * 100.0));
            }
        }

        if text.matches('!').count() >= 3 {
            score += EXCLAMATION_WEIGHT;
            reasons.push("multiple exclamation marks".to_string());
        }

        let dominant_category = dominant.map(|(c, _)| c.to_string());
        (score, reasons, categories, dominant_category, extracted)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use lure_core::types::{RiskLevel, Sender};
    use proptest::prelude::*;

    fn subject(text: &str) -> Message {
        Message::new(Sender::Subject, text, 0)
    }

    #[test]
    fn lone_url_sits_on_threshold_boundary() {
        let text = "see http://fake-kyc.in";

        let default_scorer = ConfidenceScorer::new();
        let result = default_scorer.detect(text, &[]);
        assert_eq!(result.score, 0.30);
        assert!(!result.detected, "0.30 must not exceed the 0.35 default");

        let sensitive = ConfidenceScorer::with_threshold(0.25);
        let result = sensitive.detect(text, &[]);
        assert_eq!(result.score, 0.30);
        assert!(result.detected, "0.30 exceeds the adapted 0.25 threshold");
    }

    #[test]
    fn benign_text_scores_zero() {
        let result = ConfidenceScorer::new().detect("Hello, nice day", &[]);
        assert_eq!(result.score, 0.0);
        assert!(!result.detected);
        assert!(result.reasons.is_empty());
        assert!(result.categories.is_empty());
        assert_eq!(result.dominant_category, None);
    }

    #[test]
    fn strong_indicators_stack() {
        let result = ConfidenceScorer::new()
            .detect("Urgent! Pay to fraud@ybl or account will be blocked!!!", &[]);
        // urgency + financial patterns + handle + exclamations.
        assert!(result.detected);
        assert!(result.score >= 0.7);
        assert_eq!(result.risk_level(), RiskLevel::High);
        assert!(result.categories.contains("urgency"));
        assert!(result.extracted.payment_handles.contains("fraud@ybl"));
    }

    #[test]
    fn caps_ratio_adds_weight() {
        let shouty = ConfidenceScorer::new().detect("SEND THE MONEY NOW PLEASE", &[]);
        let calm = ConfidenceScorer::new().detect("send the money now please", &[]);
        assert!(shouty.score > calm.score);
    }

    #[test]
    fn reasons_are_capped_at_five() {
        let result = ConfidenceScorer::new().detect(
            "URGENT!!! verify account immediately, click link, share upi id \
             fraud@ybl, call 9876543210, visit http://fake-kyc.in",
            &[],
        );
        assert!(result.reasons.len() <= 5);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn escalation_requires_more_than_one_alarming_turn() {
        let scorer = ConfidenceScorer::new();
        let base = scorer.detect("ok tell me more", &[]).score;

        let one_alarming = vec![
            subject("nice weather"),
            subject("urgent, share upi id to fraud@ybl immediately"),
        ];
        assert_eq!(scorer.detect("ok tell me more", &one_alarming).score, base);

        let two_alarming = vec![
            subject("urgent, your account will be blocked today, verify account immediately"),
            subject("urgent, share upi id to fraud@ybl immediately"),
        ];
        let boosted = scorer.detect("ok tell me more", &two_alarming).score;
        assert_eq!(boosted, round2(base + 0.2));
    }

    #[test]
    fn escalation_survives_interleaved_agent_replies() {
        // Real session histories alternate subject and agent turns; the
        // agent's own benign replies must not dilute the window.
        let scorer = ConfidenceScorer::new();
        let alarming_a = "urgent, your account will be blocked today, verify account immediately";
        let alarming_b = "urgent, share upi id to fraud@ybl immediately";

        let interleaved = vec![
            subject(alarming_a),
            Message::new(Sender::Agent, "oh no, which bank is this?", 0),
            subject(alarming_b),
            Message::new(Sender::Agent, "ok let me check my phone", 0),
        ];
        let subject_only = vec![subject(alarming_a), subject(alarming_b)];

        let diluted = scorer.detect("ok tell me more", &interleaved).score;
        let boosted = scorer.detect("ok tell me more", &subject_only).score;
        assert_eq!(diluted, boosted);
        assert_eq!(diluted, 0.2);
    }

    #[test]
    fn escalation_only_considers_last_three_turns() {
        let scorer = ConfidenceScorer::new();
        let history = vec![
            subject("urgent, share upi id to fraud@ybl immediately"),
            subject("urgent, your account will be blocked today, verify account immediately"),
            subject("hello"),
            subject("how are you"),
            subject("nice weather"),
        ];
        // The alarming turns fell out of the three-turn window.
        let result = scorer.detect("ok tell me more", &history);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn dominant_category_has_most_matches() {
        let result = ConfidenceScorer::new()
            .detect("verify account and confirm details via this official link, urgent", &[]);
        assert_eq!(result.dominant_category.as_deref(), Some("verification"));
    }

    #[test]
    fn matched_keywords_name_categories() {
        let result = ConfidenceScorer::new().detect("urgent: verify account today", &[]);
        assert!(result.extracted.matched_keywords.contains("urgency"));
        assert!(result.extracted.matched_keywords.contains("verification"));
    }

    #[test]
    fn adapted_threshold_tiers() {
        assert_eq!(adapted_threshold(None), 0.35);
        assert_eq!(adapted_threshold(Some(0.10)), 0.35);
        assert_eq!(adapted_threshold(Some(0.30)), 0.30);
        assert_eq!(adapted_threshold(Some(0.50)), 0.25);
    }

    proptest! {
        #[test]
        fn score_is_always_bounded(text in ".{0,400}") {
            let result = ConfidenceScorer::new().detect(&text, &[]);
            prop_assert!((0.0..=1.0).contains(&result.score));
        }
    }
}
