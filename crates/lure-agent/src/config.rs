// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine configuration model.
//!
//! Deserializable with per-field defaults, so a host can supply a partial
//! document (file, env layer, inline JSON) and get the documented defaults
//! for everything it omits. Loading and layering is the host's concern.

use lure_engage::StateThresholds;
use lure_graph::RiskMultipliers;
use serde::{Deserialize, Serialize};

fn default_fallback_reply() -> String {
    "Sorry, my phone is acting up. Can you send that again?".to_string()
}

fn default_artifact_cap() -> usize {
    5
}

fn default_keyword_cap() -> usize {
    10
}

/// Tunable knobs for one [`Engine`](crate::Engine) instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EngineConfig {
    /// Message-count thresholds driving engagement state transitions.
    pub thresholds: StateThresholds,

    /// Regional fraud-prevalence signal in [0, 1], when the host has one.
    /// Lowers the detection threshold in higher-risk regions; `None` keeps
    /// the default threshold.
    pub regional_fraud_prevalence: Option<f64>,

    /// Reply substituted when the responder collaborator fails.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,

    /// Values kept per artifact field in the final report.
    #[serde(default = "default_artifact_cap")]
    pub report_artifact_cap: usize,

    /// Keywords kept in the final report.
    #[serde(default = "default_keyword_cap")]
    pub report_keyword_cap: usize,

    /// Use multiplier-weighted risk in case reports instead of raw reuse
    /// counts.
    pub use_enhanced_risk: bool,

    /// Per-kind risk multipliers for the enhanced model.
    pub risk_multipliers: RiskMultipliers,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: StateThresholds::default(),
            regional_fraud_prevalence: None,
            fallback_reply: default_fallback_reply(),
            report_artifact_cap: default_artifact_cap(),
            report_keyword_cap: default_keyword_cap(),
            use_enhanced_risk: false,
            risk_multipliers: RiskMultipliers::default(),
        }
    }
}
