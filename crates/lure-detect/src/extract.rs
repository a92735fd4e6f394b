// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity extraction: typed artifacts pulled out of free text.
//!
//! Extraction is a pure function of its input. Malformed input never
//! raises; it simply yields empty sets.

use lure_core::types::ExtractedArtifacts;

use crate::patterns::{
    BANK_ACCOUNT_RE, EMAIL_RE, NATIONAL_ID_RE, PAYMENT_HANDLE_RE, PHONE_RE,
    PREFIXED_MOBILE_RE, SAFE_PHONE_PREFIXES, SAFE_URL_DOMAINS, TAX_ID_RE, URL_RE,
};

/// Stateless extractor over the built-in entity patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every artifact category from `text`.
    pub fn extract(&self, text: &str) -> ExtractedArtifacts {
        let mut artifacts = ExtractedArtifacts::default();

        for m in URL_RE.find_iter(text) {
            let lower = m.as_str().to_lowercase();
            if SAFE_URL_DOMAINS.iter().any(|d| lower.contains(d)) {
                continue;
            }
            let url = if lower.starts_with("http://") || lower.starts_with("https://") {
                m.as_str().to_string()
            } else {
                format!("http://{}", m.as_str())
            };
            artifacts.urls.insert(url);
        }

        for m in PAYMENT_HANDLE_RE.find_iter(text) {
            let handle = m.as_str().to_lowercase();
            if handle.len() >= 5 {
                artifacts.payment_handles.insert(handle);
            }
        }

        for m in PHONE_RE.find_iter(text) {
            if let Some(phone) = normalize_phone(m.as_str()) {
                artifacts.phone_numbers.insert(phone);
            }
        }

        // Bank-account spans are collected so national-ID candidates nested
        // inside a longer digit group are not double-counted.
        let mut account_spans: Vec<(usize, usize)> = Vec::new();
        for m in BANK_ACCOUNT_RE.find_iter(text) {
            account_spans.push((m.start(), m.end()));
            let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
            artifacts.bank_accounts.insert(digits);
        }

        for m in TAX_ID_RE.find_iter(text) {
            artifacts.tax_ids.insert(m.as_str().to_string());
        }

        for m in NATIONAL_ID_RE.find_iter(text) {
            if account_spans
                .iter()
                .any(|&(start, end)| m.start() >= start && m.end() <= end)
            {
                continue;
            }
            let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
            // A 12-digit candidate that is phone-shaped is a phone number,
            // not a national ID.
            if PREFIXED_MOBILE_RE.is_match(&digits) {
                continue;
            }
            artifacts.national_ids.insert(digits);
        }

        for m in EMAIL_RE.find_iter(text) {
            artifacts.emails.insert(m.as_str().to_lowercase());
        }

        artifacts
    }
}

/// Strip a phone candidate to digits and normalize the country prefix.
///
/// Returns `None` for toll-free numbers and anything shorter than 10
/// digits after cleaning.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 10 {
        return None;
    }
    if SAFE_PHONE_PREFIXES.iter().any(|p| digits.starts_with(p)) {
        return None;
    }
    if digits.len() == 10 {
        Some(format!("91{digits}"))
    } else {
        Some(digits)
    }
}
