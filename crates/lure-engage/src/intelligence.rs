// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session accumulated intelligence.
//!
//! The aggregate only ever grows, and set semantics make merging the same
//! artifacts twice a no-op. Keywords are reduced to the category-label
//! portion of each reason string and capped at merge time, so the
//! long-lived aggregate never accumulates free-text reason strings.

use std::collections::BTreeSet;

use lure_core::types::ExtractedArtifacts;
use lure_detect::extract::normalize_phone;
use serde::{Deserialize, Serialize};

/// Keywords kept per session. Applied at merge, not at reporting.
pub const KEYWORD_CAP: usize = 10;

/// Deduplicated intelligence accumulated across a session's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIntelligence {
    pub bank_accounts: BTreeSet<String>,
    pub payment_handles: BTreeSet<String>,
    pub phone_numbers: BTreeSet<String>,
    pub phishing_links: BTreeSet<String>,
    pub emails: BTreeSet<String>,
    pub tax_ids: BTreeSet<String>,
    pub national_ids: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
}

impl SessionIntelligence {
    /// Union `artifacts` and the category labels of `reasons` into the
    /// aggregate. Never removes data and never fails.
    pub fn merge(&mut self, artifacts: &ExtractedArtifacts, reasons: &[String]) {
        self.bank_accounts.extend(artifacts.bank_accounts.iter().cloned());
        self.payment_handles.extend(artifacts.payment_handles.iter().cloned());
        self.phishing_links.extend(artifacts.urls.iter().cloned());
        self.emails.extend(artifacts.emails.iter().cloned());
        self.tax_ids.extend(artifacts.tax_ids.iter().cloned());
        self.national_ids.extend(artifacts.national_ids.iter().cloned());

        // Same digit-only cleaning as extraction, applied again at the
        // merge boundary.
        for phone in &artifacts.phone_numbers {
            if let Some(cleaned) = normalize_phone(phone) {
                self.phone_numbers.insert(cleaned);
            }
        }

        for keyword in &artifacts.matched_keywords {
            self.insert_keyword(keyword);
        }
        for reason in reasons {
            let label = reason.split(':').next().unwrap_or(reason).trim();
            if !label.is_empty() {
                self.insert_keyword(label);
            }
        }
    }

    fn insert_keyword(&mut self, keyword: &str) {
        if self.keywords.len() < KEYWORD_CAP || self.keywords.contains(keyword) {
            self.keywords.insert(keyword.to_string());
        }
    }

    /// Number of distinct financially actionable artifact values collected
    /// so far (union across accounts, handles, phones, and links). Drives
    /// the early-exit rule.
    pub fn financial_artifact_count(&self) -> usize {
        self.bank_accounts
            .iter()
            .chain(&self.payment_handles)
            .chain(&self.phone_numbers)
            .chain(&self.phishing_links)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// True when nothing has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.financial_artifact_count() == 0
            && self.emails.is_empty()
            && self.tax_ids.is_empty()
            && self.national_ids.is_empty()
            && self.keywords.is_empty()
    }
}
