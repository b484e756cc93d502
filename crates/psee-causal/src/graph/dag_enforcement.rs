//! Cycle checks on the candidate graph.

use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::Dfs;

use super::causal_graph::{CausalGraph, VariableGraph};

/// Check whether adding an edge from `source` to `target` would create a cycle.
///
/// Returns `true` if a cycle would be created.
pub fn would_create_cycle(graph: &CausalGraph, source: NodeIndex, target: NodeIndex) -> bool {
    if source == target {
        return true;
    }
    // source→target closes a cycle iff target already reaches source.
    has_path(&graph.graph, target, source)
}

/// DFS reachability: can we reach `to` from `from`?
fn has_path(graph: &VariableGraph, from: NodeIndex, to: NodeIndex) -> bool {
    let mut dfs = Dfs::new(graph, from);
    while let Some(node) = dfs.next(graph) {
        if node == to {
            return true;
        }
    }
    false
}

/// Strongly connected components with more than one node, as label lists.
pub fn find_cycles(graph: &CausalGraph) -> Vec<Vec<String>> {
    tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            scc.into_iter()
                .map(|idx| graph.graph[idx].label.clone())
                .collect()
        })
        .collect()
}
