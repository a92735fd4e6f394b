// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fraud detection for the Lure engagement engine.
//!
//! Three pieces: a static [`patterns::PatternLibrary`] of categorized
//! signals and entity formats, a pure [`extract::EntityExtractor`], and
//! the weighted [`score::ConfidenceScorer`]. All are regex-driven; none
//! performs I/O or fails on malformed input.

pub mod extract;
pub mod patterns;
pub mod score;

pub use extract::EntityExtractor;
pub use patterns::{FraudCategory, PatternLibrary};
pub use score::{adapted_threshold, ConfidenceScorer, DEFAULT_THRESHOLD};
