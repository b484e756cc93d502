//! End-to-end orchestration: discovery → refinement → adjacency.

use psee_core::errors::PseeResult;
use psee_core::{AdjacencyMatrix, Dataset, PseeConfig};
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::adjacency::to_matrix;
use crate::discovery::{IStructureLearner, PcEngine};
use crate::graph::CausalGraph;
use crate::refinement::{RefinementController, RefinementReport};

/// Result of one dataset run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Edges as discovered, before refinement.
    pub discovered_edges: Vec<(String, String)>,
    /// Refined graph, or `None` when discovery failed.
    pub graph: Option<CausalGraph>,
    pub report: RefinementReport,
    pub matrix: AdjacencyMatrix,
}

impl PipelineOutcome {
    pub fn discovery_failed(&self) -> bool {
        self.graph.is_none()
    }
}

/// Per-dataset status in a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum BatchStatus {
    Success,
    DiscoveryFailed,
    StructuralError(String),
}

#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub id: String,
    pub status: BatchStatus,
    pub outcome: Option<PipelineOutcome>,
}

/// Structure learner plus refinement controller.
pub struct HybridPipeline {
    learner: Box<dyn IStructureLearner>,
    refiner: RefinementController,
}

impl HybridPipeline {
    pub fn new(learner: Box<dyn IStructureLearner>, refiner: RefinementController) -> Self {
        Self { learner, refiner }
    }

    pub fn from_config(config: &PseeConfig) -> Self {
        Self::new(
            Box::new(PcEngine::from_config(&config.discovery)),
            RefinementController::from_config(&config.anm),
        )
    }

    /// Run one dataset end to end.
    pub fn run(&self, data: &Dataset) -> PseeResult<PipelineOutcome> {
        let span = info_span!("psee.pipeline", variables = data.n_vars(), rows = data.n_rows());
        let _enter = span.enter();

        let candidate = self.learner.learn(data);
        let discovered_edges = candidate.as_ref().map(CausalGraph::edges).unwrap_or_default();
        let (graph, report) = self.refiner.refine_candidate(candidate, data)?;
        let matrix = to_matrix(graph.as_ref(), data.labels());

        match &graph {
            Some(g) => info!(
                nodes = g.node_count(),
                edges = g.edge_count(),
                reversed = report.reversed_count(),
                confirmed = report.confirmed_count(),
                "final graph\n{matrix}"
            ),
            None => warn!("no graph discovered\n{matrix}"),
        }

        Ok(PipelineOutcome {
            discovered_edges,
            graph,
            report,
            matrix,
        })
    }

    /// Run every dataset independently; one failure never stops the batch.
    pub fn run_batch<'a, I>(&self, datasets: I) -> Vec<BatchEntry>
    where
        I: IntoIterator<Item = (&'a str, &'a Dataset)>,
    {
        datasets
            .into_iter()
            .map(|(id, data)| match self.run(data) {
                Ok(outcome) if outcome.discovery_failed() => BatchEntry {
                    id: id.to_string(),
                    status: BatchStatus::DiscoveryFailed,
                    outcome: Some(outcome),
                },
                Ok(outcome) => BatchEntry {
                    id: id.to_string(),
                    status: BatchStatus::Success,
                    outcome: Some(outcome),
                },
                Err(e) => {
                    warn!(dataset = id, error = %e, "dataset aborted");
                    BatchEntry {
                        id: id.to_string(),
                        status: BatchStatus::StructuralError(e.to_string()),
                        outcome: None,
                    }
                }
            })
            .collect()
    }
}

impl Default for HybridPipeline {
    fn default() -> Self {
        Self::from_config(&PseeConfig::default())
    }
}
