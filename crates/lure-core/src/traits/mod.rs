// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits at the engine's external boundaries.
//!
//! The transport layer, response generator, and report callback are all
//! external collaborators; the engine only sees them through these seams.

pub mod responder;
pub mod sink;

pub use responder::Responder;
pub use sink::ReportSink;
