// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Final report assembly.
//!
//! Builds the evaluator payload from a session at the moment the report
//! gate opens. Truncation happens here, once, so the long-lived session
//! aggregate stays complete while the wire payload stays bounded.

use lure_core::report::{FinalReport, ReportedIntelligence};
use lure_engage::Session;

/// Keywords quoted verbatim in the notes summary.
const NOTE_KEYWORD_SAMPLE: usize = 5;

/// Build the one-shot report payload for `session`. `artifact_cap` bounds
/// every artifact field; `keyword_cap` bounds the keyword list.
pub fn build_final_report(
    session: &Session,
    artifact_cap: usize,
    keyword_cap: usize,
) -> FinalReport {
    let intel = &session.intelligence;
    let take = |set: &std::collections::BTreeSet<String>, cap: usize| -> Vec<String> {
        set.iter().take(cap).cloned().collect()
    };

    FinalReport {
        session_id: session.session_id.to_string(),
        scam_detected: session.scam_detected,
        total_messages_exchanged: session.message_count(),
        extracted_intelligence: ReportedIntelligence {
            bank_accounts: take(&intel.bank_accounts, artifact_cap),
            upi_ids: take(&intel.payment_handles, artifact_cap),
            phone_numbers: take(&intel.phone_numbers, artifact_cap),
            phishing_links: take(&intel.phishing_links, artifact_cap),
            email_addresses: take(&intel.emails, artifact_cap),
            pan_cards: take(&intel.tax_ids, artifact_cap),
            aadhaar_numbers: take(&intel.national_ids, artifact_cap),
            suspicious_keywords: take(&intel.keywords, keyword_cap),
        },
        agent_notes: agent_notes_summary(session),
    }
}

/// Transition notes followed by derived intelligence notes, joined into a
/// single sentence-per-note string.
fn agent_notes_summary(session: &Session) -> String {
    let intel = &session.intelligence;
    let mut notes = session.notes.clone();

    if !intel.keywords.is_empty() {
        let sample: Vec<&str> = intel
            .keywords
            .iter()
            .take(NOTE_KEYWORD_SAMPLE)
            .map(String::as_str)
            .collect();
        notes.push(format!("Suspicious keywords detected: {}", sample.join(", ")));
    }
    if !intel.payment_handles.is_empty() {
        notes.push("Scammer requested UPI payment".to_string());
    }
    if !intel.phone_numbers.is_empty() {
        notes.push("Extracted scammer phone number(s)".to_string());
    }
    if !intel.phishing_links.is_empty() {
        notes.push("Phishing links detected".to_string());
    }

    if notes.is_empty() {
        "Scam engagement completed".to_string()
    } else {
        notes.join(". ")
    }
}
