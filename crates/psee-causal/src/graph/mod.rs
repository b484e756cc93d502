//! Candidate causal graph: petgraph wrapper and acyclicity checks.

pub mod causal_graph;
pub mod dag_enforcement;

pub use causal_graph::{CausalEdge, CausalGraph, Orientation, VariableNode};
pub use dag_enforcement::{find_cycles, would_create_cycle};
