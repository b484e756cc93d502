mod adjacency;
mod ci_method;
mod dataset;
mod direction;
mod ground_truth;

pub use adjacency::AdjacencyMatrix;
pub use ci_method::CiTestMethod;
pub use dataset::{variable_label, Dataset};
pub use direction::{AnmResult, DirectionLabel};
pub use ground_truth::ExpectedDirection;
