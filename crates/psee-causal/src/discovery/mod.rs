//! Skeleton/orientation engine (PC algorithm).
//!
//! Dataset + α → directed graph over the dataset's columns. Any internal
//! failure becomes the absent-graph sentinel (`None`) at [`IStructureLearner`].

pub mod orientation;
pub mod skeleton;

use psee_core::config::DiscoveryConfig;
use psee_core::errors::{DiscoveryError, PseeResult};
use psee_core::{CiTestMethod, Dataset};
use tracing::{debug, info, warn};

use crate::graph::{find_cycles, CausalGraph};
use crate::independence::IndependenceOracle;

pub use orientation::Pdag;
pub use skeleton::{learn_skeleton, Skeleton};

/// Structure search producing a candidate directed graph.
pub trait IStructureLearner: Send + Sync {
    /// Candidate graph, or `None` when the search failed.
    fn learn(&self, data: &Dataset) -> Option<CausalGraph>;
}

/// PC search: PC-stable skeleton, colliders, Meek rules, DAG extension.
#[derive(Debug, Clone, Copy)]
pub struct PcEngine {
    alpha: f64,
    oracle: IndependenceOracle,
}

impl PcEngine {
    pub fn new(alpha: f64, method: CiTestMethod) -> Self {
        Self {
            alpha,
            oracle: IndependenceOracle::new(method),
        }
    }

    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self {
            alpha: config.alpha,
            oracle: IndependenceOracle::from_config(config),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Run the search, surfacing failures as errors.
    pub fn try_estimate(&self, data: &Dataset) -> PseeResult<CausalGraph> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(DiscoveryError::InvalidAlpha { alpha: self.alpha }.into());
        }

        info!(
            variables = data.n_vars(),
            rows = data.n_rows(),
            alpha = self.alpha,
            test = %self.oracle.method(),
            "running PC search"
        );

        let skeleton = learn_skeleton(data, self.alpha, &self.oracle);
        let mut pdag = Pdag::from_skeleton(&skeleton);
        orientation::orient_colliders(&mut pdag, &skeleton);
        orientation::apply_meek_rules(&mut pdag);
        if !orientation::extend_to_dag(&mut pdag) {
            debug!("no consistent extension, orienting remaining edges by position");
            orientation::orient_by_position(&mut pdag);
        }

        let labels = data.labels();
        let mut graph = CausalGraph::with_nodes(labels);
        for (i, j, how) in pdag.directed_edges() {
            graph.add_edge(&labels[i], &labels[j], how)?;
        }

        if skeleton.pairs().len() != graph.edge_count() {
            return Err(DiscoveryError::OrientationFailed {
                reason: format!(
                    "{} skeleton edges but {} oriented",
                    skeleton.pairs().len(),
                    graph.edge_count()
                ),
            }
            .into());
        }
        let cycles = find_cycles(&graph);
        if !cycles.is_empty() {
            warn!(?cycles, "conflicting colliders left a directed cycle");
        }

        debug!(edges = graph.edge_count(), "PC search complete");
        Ok(graph)
    }

    /// Run the search; failures are logged and reported as `None`.
    pub fn estimate(&self, data: &Dataset) -> Option<CausalGraph> {
        match self.try_estimate(data) {
            Ok(graph) => Some(graph),
            Err(e) => {
                warn!(error = %e, "structure discovery failed");
                None
            }
        }
    }
}

impl Default for PcEngine {
    fn default() -> Self {
        Self::from_config(&DiscoveryConfig::default())
    }
}

impl IStructureLearner for PcEngine {
    fn learn(&self, data: &Dataset) -> Option<CausalGraph> {
        self.estimate(data)
    }
}

/// One-shot PC run with the given threshold and test.
pub fn run_pc(data: &Dataset, alpha: f64, method: CiTestMethod) -> Option<CausalGraph> {
    PcEngine::new(alpha, method).estimate(data)
}
