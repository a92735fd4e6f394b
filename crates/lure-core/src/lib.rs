// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lure scam-engagement engine.
//!
//! This crate provides the shared data model, the error enum, and the
//! collaborator trait seams used throughout the Lure workspace.

pub mod error;
pub mod report;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LureError;
pub use report::{FinalReport, ReportedIntelligence};
pub use traits::{ReportSink, Responder};
pub use types::{
    DetectionResult, EngagementState, ExtractedArtifacts, Message, RiskLevel, Sender,
    SessionId,
};
