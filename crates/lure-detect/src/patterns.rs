// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static pattern library: categorized fraud signals and entity formats.
//!
//! Pure data. All regexes are compiled once at first use; the scorer and
//! extractor consume the library read-only, so adding a category or a
//! pattern never touches their logic.

use std::sync::LazyLock;

use regex::Regex;
use strum::{Display, EnumIter, EnumString};

/// Library version, bumped whenever the signal data changes.
pub const LIBRARY_VERSION: &str = "2026.02";

/// Fraud signal categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum FraudCategory {
    /// Requests for banking details, cards, PINs, transfers.
    Financial,
    /// Time-pressure tactics.
    Urgency,
    /// Fake account/identity verification prompts.
    Verification,
    /// Prize, lottery, and cashback bait.
    Rewards,
    /// Fabricated breach or compromise warnings.
    Security,
}

/// Compiled signal patterns for one fraud category.
pub struct CategorySignals {
    pub category: FraudCategory,
    /// Score contribution per distinct matching pattern.
    pub weight: f64,
    pub patterns: Vec<Regex>,
}

/// The categorized fraud-signal library.
pub struct PatternLibrary {
    pub version: &'static str,
    categories: Vec<CategorySignals>,
}

impl PatternLibrary {
    pub fn categories(&self) -> &[CategorySignals] {
        &self.categories
    }

    /// The built-in library, compiled once.
    pub fn builtin() -> &'static PatternLibrary {
        &BUILTIN
    }
}

/// Per-category pattern weight.
const CATEGORY_WEIGHT: f64 = 0.1;

fn compile_category(category: FraudCategory, raw: &[&str]) -> CategorySignals {
    CategorySignals {
        category,
        weight: CATEGORY_WEIGHT,
        patterns: raw
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).expect("builtin pattern must compile"))
            .collect(),
    }
}

static BUILTIN: LazyLock<PatternLibrary> = LazyLock::new(|| PatternLibrary {
    version: LIBRARY_VERSION,
    categories: vec![
        compile_category(
            FraudCategory::Financial,
            &[
                r"bank account",
                r"account.*block",
                r"account.*suspend",
                r"upi.*id",
                r"share.*upi",
                r"money.*transfer",
                r"bank.*details",
                r"credit.*card",
                r"debit.*card",
                r"account.*number",
                r"atm.*card",
                r"pin.*number",
            ],
        ),
        compile_category(
            FraudCategory::Urgency,
            &[
                r"urgent",
                r"immediately",
                r"right now",
                r"asap",
                r"today only",
                r"limited time",
                r"hurry",
                r"last chance",
                r"final warning",
                r"expire.*today",
            ],
        ),
        compile_category(
            FraudCategory::Verification,
            &[
                r"verify.*account",
                r"confirm.*details",
                r"update.*information",
                r"click.*link",
                r"click.*here",
                r"visit.*link",
                r"secure.*link",
                r"official.*link",
                r"validate.*account",
                r"complete.*kyc",
            ],
        ),
        compile_category(
            FraudCategory::Rewards,
            &[
                r"you.*won",
                r"congratulation",
                r"prize.*money",
                r"free.*gift",
                r"reward.*claim",
                r"lottery.*winner",
                r"cash.*prize",
                r"jackpot",
                r"lucky.*draw",
            ],
        ),
        compile_category(
            FraudCategory::Security,
            &[
                r"security.*breach",
                r"suspicious.*activity",
                r"hack.*account",
                r"compromise.*account",
                r"login.*attempt",
                r"unauthorized.*access",
            ],
        ),
    ],
});

// --- Entity extraction patterns ---

/// Scheme-prefixed URLs, bare `www.` hosts, and common shortener hosts.
pub static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+|www\.[^\s<>"{}|\\^`\[\]]+|bit\.ly/[a-zA-Z0-9]+|t\.me/[a-zA-Z0-9_]+|wa\.me/\d+"#,
    )
    .expect("url pattern must compile")
});

/// UPI-style payment handles against the known-provider token list.
pub static PAYMENT_HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._-]+@(ybl|paytm|okaxis|oksbi|okicici|okhdfcbank|apl|ibl|axl|upi)\b")
        .expect("payment handle pattern must compile")
});

/// Mobile numbers with optional country prefix, plus STD landlines.
pub static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+91[\s-]?[6-9]\d{9}|\b91[\s-]?[6-9]\d{9}\b|\b[6-9]\d{9}\b|\b0[1-9]\d{9,10}\b")
        .expect("phone pattern must compile")
});

/// Fixed-width grouped digits (card/account shaped).
pub static BANK_ACCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b")
        .expect("bank account pattern must compile")
});

/// Email addresses (full TLD form, unlike payment handles).
pub static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern must compile")
});

/// Tax-ID-style identifiers (five letters, four digits, one letter).
pub static TAX_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{5}[0-9]{4}[A-Z]\b").expect("tax id pattern must compile")
});

/// National-ID-style identifiers (12 digits with optional separators).
pub static NATIONAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}\b").expect("national id pattern must compile")
});

/// Digit form of a mobile number carrying the country prefix. Used for the
/// phone-over-national-ID precedence rule.
pub static PREFIXED_MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^91[6-9]\d{9}$").expect("mobile shape must compile"));

/// Toll-free prefixes excluded from phone extraction.
pub const SAFE_PHONE_PREFIXES: &[&str] = &["1800", "1860"];

/// Well-known legitimate domains excluded from URL extraction.
pub const SAFE_URL_DOMAINS: &[&str] = &[
    "google.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "youtube.com",
    "linkedin.com",
    "microsoft.com",
    "apple.com",
];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn builtin_library_covers_all_categories() {
        let library = PatternLibrary::builtin();
        for category in FraudCategory::iter() {
            assert!(
                library.categories().iter().any(|c| c.category == category),
                "missing signals for {category}"
            );
        }
    }

    #[test]
    fn builtin_patterns_are_nonempty_and_weighted() {
        for signals in PatternLibrary::builtin().categories() {
            assert!(!signals.patterns.is_empty());
            assert!(signals.weight > 0.0);
        }
    }

    #[test]
    fn category_display_lowercase() {
        assert_eq!(FraudCategory::Financial.to_string(), "financial");
        assert_eq!(FraudCategory::Rewards.to_string(), "rewards");
    }

    #[test]
    fn handle_pattern_rejects_plain_email() {
        assert!(PAYMENT_HANDLE_RE.is_match("pay me at fraud@ybl"));
        assert!(!PAYMENT_HANDLE_RE.is_match("write to someone@gmail.com"));
    }

    #[test]
    fn phone_pattern_matches_prefixed_and_bare() {
        assert!(PHONE_RE.is_match("+91 9876543210"));
        assert!(PHONE_RE.is_match("call 9876543210"));
        assert!(!PHONE_RE.is_match("call 12345"));
    }
}
