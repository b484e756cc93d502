//! petgraph::StableGraph wrapper keyed by variable label.

use std::collections::HashMap;
use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use psee_core::errors::{GraphError, PseeResult};

/// A node in the candidate graph, one per dataset column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableNode {
    pub label: String,
}

impl fmt::Display for VariableNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Which step of the search fixed an edge's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Oriented into an unshielded collider.
    Collider,
    /// Forced by a Meek propagation rule.
    MeekRule,
    /// Chosen while extending the pattern to a DAG.
    Extension,
    /// Flipped by the ANM refinement pass.
    Reoriented,
}

/// Weight on a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalEdge {
    pub orientation: Orientation,
}

impl fmt::Display for CausalEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.orientation {
            Orientation::Collider => "collider",
            Orientation::MeekRule => "meek",
            Orientation::Extension => "extension",
            Orientation::Reoriented => "anm",
        };
        f.write_str(label)
    }
}

/// The underlying directed graph type.
pub type VariableGraph = StableGraph<VariableNode, CausalEdge, Directed>;

/// Directed graph over a dataset's variable labels.
///
/// No self-loops and at most one directed edge per unordered pair.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    /// The petgraph stable graph.
    pub graph: VariableGraph,
    /// Map from label → NodeIndex for O(1) lookup.
    pub node_index: HashMap<String, NodeIndex>,
}

impl CausalGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Edgeless graph over `labels`, nodes inserted in order.
    pub fn with_nodes<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut graph = Self::new();
        for label in labels {
            graph.ensure_node(label.as_ref());
        }
        graph
    }

    /// Get or create the node for `label`.
    pub fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(VariableNode {
            label: label.to_string(),
        });
        self.node_index.insert(label.to_string(), idx);
        idx
    }

    /// Look up a node index by label.
    pub fn get_node(&self, label: &str) -> Option<NodeIndex> {
        self.node_index.get(label).copied()
    }

    /// Labels in insertion order.
    pub fn node_labels(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].label.clone())
            .collect()
    }

    /// Whether `source → target` is present.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        match (self.get_node(source), self.get_node(target)) {
            (Some(s), Some(t)) => self.graph.find_edge(s, t).is_some(),
            _ => false,
        }
    }

    /// Whether the two labels are joined in either direction.
    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        self.has_edge(a, b) || self.has_edge(b, a)
    }

    /// Insert `source → target`, creating missing nodes.
    ///
    /// Returns `Ok(false)` when the edge already exists. A self-loop or an
    /// existing `target → source` edge is rejected.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        orientation: Orientation,
    ) -> PseeResult<bool> {
        if source == target {
            return Err(GraphError::SelfLoop {
                node: source.to_string(),
            }
            .into());
        }
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        if self.graph.find_edge(s, t).is_some() {
            return Ok(false);
        }
        if self.graph.find_edge(t, s).is_some() {
            return Err(GraphError::ConflictingEdge {
                source_node: source.to_string(),
                target: target.to_string(),
            }
            .into());
        }
        self.graph.add_edge(s, t, CausalEdge { orientation });
        Ok(true)
    }

    /// Remove `source → target`. Returns whether it was present.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        let (Some(s), Some(t)) = (self.get_node(source), self.get_node(target)) else {
            return false;
        };
        match self.graph.find_edge(s, t) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    /// Replace `source → target` by `target → source`.
    ///
    /// The old edge is removed before the new one is added, so the pair never
    /// carries both directions.
    pub fn reverse_edge(&mut self, source: &str, target: &str) -> PseeResult<()> {
        if !self.remove_edge(source, target) {
            return Err(GraphError::EdgeNotFound {
                source_node: source.to_string(),
                target: target.to_string(),
            }
            .into());
        }
        self.add_edge(target, source, Orientation::Reoriented)?;
        Ok(())
    }

    /// Snapshot of every edge as `(source, target)` labels.
    pub fn edges(&self) -> Vec<(String, String)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].label.clone(),
                    self.graph[e.target()].label.clone(),
                )
            })
            .collect()
    }

    /// Orientation recorded on `source → target`.
    pub fn orientation(&self, source: &str, target: &str) -> Option<Orientation> {
        let edge = self
            .graph
            .find_edge(self.get_node(source)?, self.get_node(target)?)?;
        Some(self.graph[edge].orientation)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn sorted_edges(&self) -> Vec<(String, String)> {
        let mut edges = self.edges();
        edges.sort();
        edges
    }
}

impl Default for CausalGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality: same labels and same directed edges.
impl PartialEq for CausalGraph {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.node_labels();
        let mut b = other.node_labels();
        a.sort();
        b.sort();
        a == b && self.sorted_edges() == other.sorted_edges()
    }
}
