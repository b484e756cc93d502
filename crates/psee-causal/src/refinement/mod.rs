//! Hybrid refinement: ANM-test every discovered edge and flip the ones the
//! test says point the wrong way.

mod report;

use psee_core::config::AnmConfig;
use psee_core::errors::PseeResult;
use psee_core::traits::IDirectionTester;
use psee_core::{AnmResult, Dataset};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::anm::AnmTester;
use crate::graph::{would_create_cycle, CausalGraph};

pub use report::{EdgeAction, EdgeDecision, RefinementReport};

/// Owns the direction tester and applies its verdicts to a graph.
pub struct RefinementController {
    tester: Box<dyn IDirectionTester>,
    alpha: f64,
    parallel: bool,
}

impl RefinementController {
    pub fn new(tester: Box<dyn IDirectionTester>, alpha: f64) -> Self {
        Self {
            tester,
            alpha,
            parallel: false,
        }
    }

    /// Run the per-edge tests on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn from_config(config: &AnmConfig) -> Self {
        Self::new(Box::new(AnmTester::from_config(config)), config.alpha)
            .with_parallel(config.parallel_edges)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Test every edge of a snapshot and reverse those labelled backward.
    ///
    /// Every endpoint is checked against `data` before anything runs, so an
    /// unknown variable leaves `graph` untouched. Tests see the snapshot;
    /// mutations are applied one edge at a time in snapshot order.
    pub fn refine(&self, graph: &mut CausalGraph, data: &Dataset) -> PseeResult<RefinementReport> {
        let snapshot = graph.edges();
        let pairs = snapshot
            .iter()
            .map(|(u, v)| data.select(&[u.as_str(), v.as_str()]))
            .collect::<PseeResult<Vec<_>>>()?;

        let results: Vec<AnmResult> = if self.parallel {
            pairs
                .par_iter()
                .map(|pair| self.tester.test_direction(pair, self.alpha))
                .collect()
        } else {
            pairs
                .iter()
                .map(|pair| self.tester.test_direction(pair, self.alpha))
                .collect()
        };

        let mut report = RefinementReport::default();
        for ((u, v), result) in snapshot.into_iter().zip(results) {
            let decision = self.apply(graph, u, v, result)?;
            report.decisions.push(decision);
        }

        info!(
            edges = report.decisions.len(),
            reversed = report.reversed_count(),
            "refinement complete"
        );
        Ok(report)
    }

    fn apply(
        &self,
        graph: &mut CausalGraph,
        u: String,
        v: String,
        result: AnmResult,
    ) -> PseeResult<EdgeDecision> {
        if !result.label.is_reverse() {
            info!(
                source = %u,
                target = %v,
                label = %result.label,
                p_forward = result.p_forward,
                p_backward = result.p_backward,
                "[ANM Confirmed] Direction: {u}->{v}"
            );
            return Ok(EdgeDecision {
                source: u,
                target: v,
                result,
                action: EdgeAction::Kept,
                created_cycle: false,
            });
        }

        info!(
            source = %u,
            target = %v,
            label = %result.label,
            p_forward = result.p_forward,
            p_backward = result.p_backward,
            "[ANM Correction] Reversing edge {u}->{v} to {v}->{u}"
        );
        graph.reverse_edge(&u, &v)?;
        // With v→u in place, a path u ⇝ v is a directed cycle.
        let created_cycle = match (graph.get_node(&v), graph.get_node(&u)) {
            (Some(s), Some(t)) => would_create_cycle(graph, s, t),
            _ => false,
        };
        if created_cycle {
            warn!(source = %v, target = %u, "reversal closed a directed cycle");
        }

        Ok(EdgeDecision {
            source: u,
            target: v,
            result,
            action: EdgeAction::Reversed,
            created_cycle,
        })
    }

    /// Refine a discovery result; the absent sentinel passes through.
    pub fn refine_candidate(
        &self,
        candidate: Option<CausalGraph>,
        data: &Dataset,
    ) -> PseeResult<(Option<CausalGraph>, RefinementReport)> {
        match candidate {
            Some(mut graph) => {
                let report = self.refine(&mut graph, data)?;
                Ok((Some(graph), report))
            }
            None => Ok((None, RefinementReport::default())),
        }
    }
}

impl Default for RefinementController {
    fn default() -> Self {
        Self::from_config(&AnmConfig::default())
    }
}

/// `refine(candidate_graph, dataset, α)` with the default tester.
pub fn refine(
    candidate: Option<CausalGraph>,
    data: &Dataset,
    alpha: f64,
) -> PseeResult<Option<CausalGraph>> {
    let controller = RefinementController::new(Box::new(AnmTester::default()), alpha);
    Ok(controller.refine_candidate(candidate, data)?.0)
}
