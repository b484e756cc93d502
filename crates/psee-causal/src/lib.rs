//! # psee-causal
//!
//! Hybrid causal discovery on small continuous datasets. A PC search finds
//! the skeleton and orients it; an additive-noise-model test then keeps or
//! flips every discovered edge; the result is read out as an adjacency
//! matrix.

pub mod adjacency;
pub mod anm;
pub mod benchmark;
pub mod discovery;
pub mod graph;
pub mod independence;
pub mod pipeline;
pub mod refinement;
pub mod stats;
pub mod synthetic;

pub use adjacency::{graph_matrix, to_matrix};
pub use anm::{test_direction, AnmTester};
pub use discovery::{run_pc, IStructureLearner, PcEngine};
pub use graph::{CausalGraph, Orientation};
pub use independence::IndependenceOracle;
pub use pipeline::{BatchEntry, BatchStatus, HybridPipeline, PipelineOutcome};
pub use refinement::{refine, EdgeAction, EdgeDecision, RefinementController, RefinementReport};
pub use synthetic::{CausalModel, Structure};
