// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-case correlation for the Lure engine: a process-wide graph of
//! cases and their artifacts, reuse-based risk scoring, and per-case
//! correlation reports.

pub mod graph;
pub mod report;

pub use graph::{
    CaseArtifacts, CorrelationGraph, GraphEdge, GraphNode, GraphStatistics, NodeKind, Relation,
    RiskMultipliers,
};
pub use report::{CasePriority, CaseReport, LinkedArtifact};
