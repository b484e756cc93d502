/// Candidate graph errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("self-loop rejected on {node}")]
    SelfLoop { node: String },

    #[error("edge {source_node}->{target} conflicts with existing reverse edge")]
    ConflictingEdge { source_node: String, target: String },

    #[error("edge {source_node}->{target} not found")]
    EdgeNotFound { source_node: String, target: String },
}
