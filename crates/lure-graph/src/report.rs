// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-case correlation reports.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::graph::{CorrelationGraph, NodeKind, Relation, RiskMultipliers};

/// Investigation priority of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CasePriority {
    High,
    Medium,
}

/// One artifact linked to a case, with its current risk standing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedArtifact {
    pub artifact: String,
    pub kind: NodeKind,
    pub risk_score: f64,
    pub relation: Relation,
}

/// Consolidated correlation view of one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseReport {
    pub case_id: String,
    pub total_linked_artifacts: usize,
    pub priority: CasePriority,
    pub linked_artifacts: Vec<LinkedArtifact>,
    pub risk_model: String,
}

impl CorrelationGraph {
    /// Build a correlation report for one case. With `use_enhanced`, risk
    /// scores are multiplier-weighted and the HIGH priority bar moves from
    /// 1.0 to 1.5.
    pub fn case_report(
        &self,
        case_id: &str,
        use_enhanced: bool,
        multipliers: &RiskMultipliers,
    ) -> CaseReport {
        let linked_artifacts: Vec<LinkedArtifact> = self
            .linked_nodes(case_id)
            .into_iter()
            .map(|(node, relation)| {
                let risk_score = if use_enhanced {
                    self.enhanced_risk_score(&node.id, multipliers)
                } else {
                    node.visit_count as f64
                };
                LinkedArtifact {
                    artifact: node.id,
                    kind: node.kind,
                    risk_score,
                    relation,
                }
            })
            .collect();

        let high_bar = if use_enhanced { 1.5 } else { 1.0 };
        let priority = if linked_artifacts.iter().any(|a| a.risk_score > high_bar) {
            CasePriority::High
        } else {
            CasePriority::Medium
        };

        CaseReport {
            case_id: case_id.to_string(),
            total_linked_artifacts: linked_artifacts.len(),
            priority,
            linked_artifacts,
            risk_model: if use_enhanced { "enhanced" } else { "standard" }.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CaseArtifacts;

    fn handle_case(handle: &str) -> CaseArtifacts {
        CaseArtifacts {
            payment_handles: vec![handle.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn single_case_is_medium_priority() {
        let graph = CorrelationGraph::new();
        graph.record_case("CASE-1", &handle_case("fraud@ybl"), &[]);
        let report = graph.case_report("CASE-1", false, &RiskMultipliers::default());
        assert_eq!(report.priority, CasePriority::Medium);
        assert_eq!(report.total_linked_artifacts, 1);
        assert_eq!(report.risk_model, "standard");
    }

    #[test]
    fn reuse_elevates_either_case_to_high() {
        let graph = CorrelationGraph::new();
        graph.record_case("CASE-1", &handle_case("fraud@ybl"), &[]);
        graph.record_case("CASE-2", &handle_case("fraud@ybl"), &[]);

        for case_id in ["CASE-1", "CASE-2"] {
            let report = graph.case_report(case_id, false, &RiskMultipliers::default());
            assert_eq!(report.priority, CasePriority::High, "{case_id}");
            assert_eq!(report.linked_artifacts[0].risk_score, 2.0);
        }
    }

    #[test]
    fn enhanced_model_raises_the_high_bar() {
        let graph = CorrelationGraph::new();
        graph.record_case("CASE-1", &handle_case("fraud@ybl"), &[]);

        // One visit * 1.4 = 1.4: above the standard bar, below enhanced.
        let multipliers = RiskMultipliers {
            fraud: 1.4,
            ..Default::default()
        };
        let standard = graph.case_report("CASE-1", false, &multipliers);
        assert_eq!(standard.priority, CasePriority::Medium); // visit count 1

        let enhanced = graph.case_report("CASE-1", true, &multipliers);
        assert_eq!(enhanced.priority, CasePriority::Medium);
        assert_eq!(enhanced.linked_artifacts[0].risk_score, 1.4);
        assert_eq!(enhanced.risk_model, "enhanced");
    }

    #[test]
    fn unknown_case_yields_empty_medium_report() {
        let graph = CorrelationGraph::new();
        let report = graph.case_report("GHOST", false, &RiskMultipliers::default());
        assert!(report.linked_artifacts.is_empty());
        assert_eq!(report.priority, CasePriority::Medium);
    }

    #[test]
    fn report_serializes_camel_case() {
        let graph = CorrelationGraph::new();
        graph.record_case("CASE-1", &handle_case("fraud@ybl"), &[]);
        let json =
            serde_json::to_string(&graph.case_report("CASE-1", false, &RiskMultipliers::default()))
                .unwrap();
        assert!(json.contains("\"caseId\":\"CASE-1\""));
        assert!(json.contains("\"totalLinkedArtifacts\":1"));
        assert!(json.contains("\"priority\":\"MEDIUM\""));
        assert!(json.contains("\"relation\":\"USED_IN\""));
    }
}
