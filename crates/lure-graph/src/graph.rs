// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-case correlation graph.
//!
//! Every processed case contributes a case node plus edges to its artifact
//! nodes. Node visit counts are the reuse signal: infrastructure seen
//! across more cases is riskier. `record_case` is deliberately not
//! idempotent at the edge level — repeated submissions of the same
//! artifact across distinct cases are exactly the signal being measured.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

/// Ceiling on any single artifact's enhanced risk contribution.
const ENHANCED_RISK_CAP: f64 = 10.0;

/// Kinds of graph nodes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Case,
    PaymentHandle,
    Phone,
    Url,
    BehaviorTag,
}

/// Edge relations, by artifact kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    UsedIn,
    ContactedBy,
    Exploits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    /// How many case-processing calls referenced this id. Always ≥ 1.
    pub visit_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub relation: Relation,
}

/// Artifacts of one case, grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct CaseArtifacts {
    pub payment_handles: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub urls: Vec<String>,
}

/// Per-kind multipliers supplied by an external dataset-derived provider.
/// Absent that provider, everything defaults to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RiskMultipliers {
    pub fraud: f64,
    pub urgency: f64,
    pub info_theft: f64,
}

impl Default for RiskMultipliers {
    fn default() -> Self {
        Self {
            fraud: 1.0,
            urgency: 1.0,
            info_theft: 1.0,
        }
    }
}

impl RiskMultipliers {
    fn for_kind(&self, kind: NodeKind) -> f64 {
        match kind {
            NodeKind::PaymentHandle => self.fraud,
            NodeKind::Phone => self.urgency,
            NodeKind::Url => self.info_theft,
            _ => (self.fraud + self.urgency + self.info_theft) / 3.0,
        }
    }
}

/// Aggregate graph statistics for operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub nodes_by_kind: HashMap<NodeKind, usize>,
    /// Nodes seen in more than one case, most-reused first.
    pub reused_nodes: Vec<GraphNode>,
}

#[derive(Debug, Default)]
struct GraphInner {
    nodes: HashMap<String, GraphNode>,
    edges: Vec<GraphEdge>,
}

impl GraphInner {
    fn touch_node(&mut self, id: &str, kind: NodeKind) {
        self.nodes
            .entry(id.to_string())
            .and_modify(|n| n.visit_count += 1)
            .or_insert_with(|| GraphNode {
                id: id.to_string(),
                kind,
                visit_count: 1,
            });
    }

    fn link(&mut self, case_id: &str, to: &str, kind: NodeKind, relation: Relation) {
        self.touch_node(to, kind);
        self.edges.push(GraphEdge {
            from: case_id.to_string(),
            to: to.to_string(),
            relation,
        });
    }
}

/// Process-wide correlation graph. Interior locking keeps each
/// `record_case` call atomic with respect to concurrent callers.
#[derive(Debug, Default)]
pub struct CorrelationGraph {
    inner: RwLock<GraphInner>,
}

impl CorrelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one case's artifacts and behavior tags into the graph.
    pub fn record_case(&self, case_id: &str, artifacts: &CaseArtifacts, behavior_tags: &[String]) {
        let mut inner = self.inner.write().expect("graph lock poisoned");

        inner.touch_node(case_id, NodeKind::Case);

        for handle in &artifacts.payment_handles {
            inner.link(case_id, handle, NodeKind::PaymentHandle, Relation::UsedIn);
        }
        for phone in &artifacts.phone_numbers {
            inner.link(case_id, phone, NodeKind::Phone, Relation::ContactedBy);
        }
        for url in &artifacts.urls {
            inner.link(case_id, url, NodeKind::Url, Relation::UsedIn);
        }
        for tag in behavior_tags {
            inner.link(case_id, tag, NodeKind::BehaviorTag, Relation::Exploits);
        }

        debug!(
            case_id,
            nodes = inner.nodes.len(),
            edges = inner.edges.len(),
            "recorded case"
        );
    }

    /// Raw reuse count for a node; 0 for unknown ids.
    pub fn risk_score(&self, node_id: &str) -> u64 {
        let inner = self.inner.read().expect("graph lock poisoned");
        inner.nodes.get(node_id).map_or(0, |n| n.visit_count)
    }

    /// Reuse count weighted by the per-kind multiplier, capped so no
    /// single artifact dominates. 0.0 for unknown ids.
    pub fn enhanced_risk_score(&self, node_id: &str, multipliers: &RiskMultipliers) -> f64 {
        let inner = self.inner.read().expect("graph lock poisoned");
        match inner.nodes.get(node_id) {
            Some(node) => {
                let raw = node.visit_count as f64 * multipliers.for_kind(node.kind);
                raw.min(ENHANCED_RISK_CAP)
            }
            None => 0.0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.inner.read().expect("graph lock poisoned").nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.read().expect("graph lock poisoned").edges.len()
    }

    /// Edges out of one case, with the current node for each target.
    pub(crate) fn linked_nodes(&self, case_id: &str) -> Vec<(GraphNode, Relation)> {
        let inner = self.inner.read().expect("graph lock poisoned");
        inner
            .edges
            .iter()
            .filter(|e| e.from == case_id)
            .filter_map(|e| {
                inner
                    .nodes
                    .get(&e.to)
                    .map(|n| (n.clone(), e.relation))
            })
            .collect()
    }

    /// Totals, per-kind counts, and the reused-node list (visit count > 1,
    /// descending).
    pub fn statistics(&self) -> GraphStatistics {
        let inner = self.inner.read().expect("graph lock poisoned");

        let mut nodes_by_kind: HashMap<NodeKind, usize> = HashMap::new();
        let mut reused_nodes: Vec<GraphNode> = Vec::new();
        for node in inner.nodes.values() {
            *nodes_by_kind.entry(node.kind).or_default() += 1;
            if node.visit_count > 1 {
                reused_nodes.push(node.clone());
            }
        }
        reused_nodes.sort_by(|a, b| b.visit_count.cmp(&a.visit_count).then(a.id.cmp(&b.id)));

        GraphStatistics {
            total_nodes: inner.nodes.len(),
            total_edges: inner.edges.len(),
            nodes_by_kind,
            reused_nodes,
        }
    }
}
