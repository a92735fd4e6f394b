// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Final report payload sent to the external evaluator.
//!
//! Field names follow the evaluator's wire format (camelCase). Truncation
//! caps are applied when the payload is built, never afterwards.

use serde::{Deserialize, Serialize};

/// Consolidated intelligence for one session, truncated for transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedIntelligence {
    pub bank_accounts: Vec<String>,
    pub upi_ids: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub phishing_links: Vec<String>,
    pub email_addresses: Vec<String>,
    pub pan_cards: Vec<String>,
    pub aadhaar_numbers: Vec<String>,
    pub suspicious_keywords: Vec<String>,
}

/// The one-shot payload emitted when an engagement is ready for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub session_id: String,
    pub scam_detected: bool,
    pub total_messages_exchanged: usize,
    pub extracted_intelligence: ReportedIntelligence,
    /// Joined transition and intelligence notes.
    pub agent_notes: String,
}
