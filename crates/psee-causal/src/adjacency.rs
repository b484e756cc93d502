//! Adjacency extraction from the refined graph.

use psee_core::AdjacencyMatrix;

use crate::graph::CausalGraph;

/// `to_matrix(graph, node_labels)`.
///
/// The absent sentinel and an edgeless graph both give all zeros of shape
/// `len × len`. Cell (i, j) is 1 iff `i → j`; the matrix is not symmetrised.
pub fn to_matrix<S: AsRef<str>>(graph: Option<&CausalGraph>, labels: &[S]) -> AdjacencyMatrix {
    match graph {
        Some(graph) => AdjacencyMatrix::from_edges(labels, graph.edges()),
        None => AdjacencyMatrix::zeros(labels),
    }
}

/// Matrix over the graph's own labels, in insertion order.
pub fn graph_matrix(graph: &CausalGraph) -> AdjacencyMatrix {
    to_matrix(Some(graph), &graph.node_labels())
}
