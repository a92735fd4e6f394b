// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Lure engagement engine.
//!
//! Wires the detection, session, and correlation layers into a single
//! per-message pipeline behind two collaborator seams: a [`Responder`]
//! that produces the agent's replies and a [`ReportSink`] that receives
//! the final report when an engagement ends.
//!
//! [`Responder`]: lure_core::traits::Responder
//! [`ReportSink`]: lure_core::traits::ReportSink

pub mod config;
pub mod engine;
pub mod report;

pub use config::EngineConfig;
pub use engine::{EngagementOutcome, Engine};
pub use report::build_final_report;
