//! # psee-core
//!
//! Foundation crate for the PSee hybrid causal discovery pipeline.
//! Defines the dataset model, decision labels, adjacency matrices, errors,
//! config, and the trait seams the discovery crate implements.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PseeConfig;
pub use errors::{PseeError, PseeResult};
pub use models::{
    AdjacencyMatrix, AnmResult, CiTestMethod, Dataset, DirectionLabel, ExpectedDirection,
};
