//! Integration tests for psee-causal: discovery, ANM, refinement, pipeline.

use std::collections::BTreeSet;

use psee_causal::anm::{decide, AnmTester};
use psee_causal::discovery::{run_pc, IStructureLearner, PcEngine};
use psee_causal::graph::{CausalGraph, Orientation};
use psee_causal::independence::{self, IndependenceOracle};
use psee_causal::pipeline::{BatchStatus, HybridPipeline};
use psee_causal::refinement::{EdgeAction, RefinementController};
use psee_causal::synthetic::{CausalModel, Structure};
use psee_causal::{refine, to_matrix};
use psee_core::config::AnmConfig;
use psee_core::errors::DataError;
use psee_core::traits::{IDirectionTester, IIndependenceTest};
use psee_core::{AnmResult, CiTestMethod, Dataset, DirectionLabel, PseeConfig, PseeError};

fn fork(n: usize, seed: u64) -> Dataset {
    CausalModel::new(n, seed)
        .generate(Structure::Fork, 3)
        .unwrap()
}

fn small_anm() -> AnmTester {
    AnmTester::from_config(&AnmConfig {
        max_samples: 120,
        ..AnmConfig::default()
    })
}

fn unordered(edges: &[(String, String)]) -> BTreeSet<(String, String)> {
    edges
        .iter()
        .map(|(a, b)| {
            if a < b {
                (a.clone(), b.clone())
            } else {
                (b.clone(), a.clone())
            }
        })
        .collect()
}

/// Tester returning a fixed label.
struct FixedTester(DirectionLabel);

impl IDirectionTester for FixedTester {
    fn test_direction(&self, _pair: &Dataset, _alpha: f64) -> AnmResult {
        AnmResult {
            label: self.0,
            p_forward: 0.0,
            p_backward: 0.0,
        }
    }
}

/// Learner returning a prepared graph (or the sentinel).
struct FixedLearner(Option<CausalGraph>);

impl IStructureLearner for FixedLearner {
    fn learn(&self, _data: &Dataset) -> Option<CausalGraph> {
        self.0.clone()
    }
}

// --- discovery ---

#[test]
fn alpha_zero_removes_every_edge() {
    let data = fork(200, 1);
    let graph = run_pc(&data, 0.0, CiTestMethod::PearsonCorrelation).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn alpha_one_keeps_the_only_pair() {
    let data = CausalModel::new(100, 2).independent_pair().unwrap();
    let graph = run_pc(&data, 1.0, CiTestMethod::PearsonCorrelation).unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn identical_columns_give_one_edge() {
    let column: Vec<f64> = (0..100).map(|i| f64::from(i % 5 + 1)).collect();
    let data = Dataset::from_columns(vec![column.clone(), column]).unwrap();
    let graph = run_pc(&data, 0.05, CiTestMethod::PearsonCorrelation).unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn invalid_alpha_yields_sentinel() {
    let data = fork(50, 3);
    assert!(run_pc(&data, 1.5, CiTestMethod::PearsonCorrelation).is_none());
    assert!(run_pc(&data, f64::NAN, CiTestMethod::FisherZ).is_none());
    assert!(PcEngine::new(-0.1, CiTestMethod::ChiSquare)
        .try_estimate(&data)
        .is_err());
}

#[test]
fn node_set_equals_column_set() {
    let data = CausalModel::new(300, 4)
        .generate(Structure::Chain, 4)
        .unwrap();
    for method in CiTestMethod::ALL {
        let graph = run_pc(&data, 0.05, method).unwrap();
        let mut labels = graph.node_labels();
        labels.sort();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
    }
}

#[test]
fn collider_is_oriented_into_the_effect() {
    // X → Z ← Y lands in columns A → C ← B.
    let data = CausalModel::new(1000, 5)
        .generate(Structure::Collider, 3)
        .unwrap();
    let graph = run_pc(&data, 0.001, CiTestMethod::PearsonCorrelation).unwrap();
    assert!(graph.has_edge("A", "C"));
    assert!(graph.has_edge("B", "C"));
    assert_eq!(graph.orientation("A", "C"), Some(Orientation::Collider));
}

#[test]
fn fork_keeps_both_strong_links() {
    let data = fork(500, 6);
    let graph = run_pc(&data, 0.01, CiTestMethod::FisherZ).unwrap();
    assert!(graph.is_adjacent("A", "C"));
    assert!(graph.is_adjacent("B", "C"));
}

// --- independence oracle ---

#[test]
fn every_method_detects_a_dependent_pair() {
    let data = fork(500, 21);
    for method in CiTestMethod::ALL {
        let p = independence::test(&data, "A", "C", &[], method).unwrap();
        assert!(p < 1e-6, "{method:?}: {p}");
    }
}

#[test]
fn conditioning_on_the_common_cause_separates_a_fork() {
    let data = fork(500, 21);
    for method in [CiTestMethod::PearsonCorrelation, CiTestMethod::FisherZ] {
        let marginal = independence::test(&data, "A", "B", &[], method).unwrap();
        let given_c = independence::test(&data, "A", "B", &["C"], method).unwrap();
        assert!(marginal < 1e-6, "{method:?}: marginal {marginal}");
        assert!(given_c > 1e-3, "{method:?}: given C {given_c}");
    }
}

#[test]
fn oracle_trait_resolves_labels() {
    let data = fork(300, 22);
    let oracle = IndependenceOracle::new(CiTestMethod::FisherZ);
    let by_label = oracle.p_value(&data, "B", "A", &["C"]).unwrap();
    let by_index = oracle.test_indices(&data, 1, 0, &[2]);
    assert_eq!(by_label, by_index);
}

#[test]
fn every_method_rejects_unknown_labels() {
    let data = fork(50, 23);
    for method in CiTestMethod::ALL {
        for (x, y, z) in [("Q", "A", vec![]), ("A", "Q", vec![]), ("A", "B", vec!["Q"])] {
            let err = independence::test(&data, x, y, &z, method).unwrap_err();
            assert!(
                matches!(err, PseeError::Data(DataError::UnknownVariable { ref label }) if label == "Q"),
                "{method:?}: {err}"
            );
        }
    }
}

#[test]
fn constant_column_gives_no_evidence_of_dependence() {
    let x: Vec<f64> = (0..80).map(|i| f64::from(i) * 0.25).collect();
    let data = Dataset::from_columns(vec![x, vec![4.0; 80]]).unwrap();
    for method in CiTestMethod::ALL {
        let p = independence::test(&data, "A", "B", &[], method).unwrap();
        assert!(p.is_finite(), "{method:?}: {p}");
        assert_eq!(p, 1.0, "{method:?}");
    }
}

// --- ANM ---

#[test]
fn decision_precedence() {
    assert_eq!(decide(0.8, 0.01, 0.05), DirectionLabel::Forward);
    assert_eq!(decide(0.3, 0.01, 0.05), DirectionLabel::Forward);
    assert_eq!(decide(0.01, 0.3, 0.05), DirectionLabel::Backward);
    assert_eq!(decide(0.3, 0.2, 0.05), DirectionLabel::WeakForward);
    assert_eq!(decide(0.01, 0.02, 0.05), DirectionLabel::WeakBackward);
    assert_eq!(decide(0.4, 0.4, 0.05), DirectionLabel::Inconclusive);
}

#[test]
fn nonlinear_pair_prefers_true_direction() {
    let data = CausalModel::new(200, 7).anm_pair().unwrap();
    let result = AnmTester::default().test_direction(&data, 0.05);
    assert!(
        result.p_forward > result.p_backward,
        "forward {} backward {}",
        result.p_forward,
        result.p_backward
    );
    assert!(result.p_backward < 0.01);
    assert!(result.label.is_forward());
}

#[test]
fn test_direction_rejects_unknown_variable() {
    let data = fork(30, 8);
    let err = psee_causal::test_direction(&data, "A", "Q", 0.05).unwrap_err();
    assert!(matches!(
        err,
        PseeError::Data(DataError::UnknownVariable { ref label }) if label == "Q"
    ));
}

// --- refinement ---

#[test]
fn backward_labels_flip_every_edge() {
    let data = fork(50, 9);
    let mut graph = CausalGraph::with_nodes(data.labels());
    graph.add_edge("A", "C", Orientation::Extension).unwrap();
    graph.add_edge("B", "C", Orientation::Extension).unwrap();

    for label in [DirectionLabel::Backward, DirectionLabel::WeakBackward] {
        let mut g = graph.clone();
        let controller = RefinementController::new(Box::new(FixedTester(label)), 0.05);
        let report = controller.refine(&mut g, &data).unwrap();
        assert_eq!(report.reversed_count(), 2);
        assert_eq!(report.confirmed_count(), 0);
        assert!(g.has_edge("C", "A"));
        assert_eq!(g.orientation("C", "A"), Some(Orientation::Reoriented));
        assert!(g.has_edge("C", "B"));
        assert_eq!(g.edge_count(), 2);
    }
}

#[test]
fn report_serializes_each_decision() {
    let data = fork(30, 18);
    let mut g = CausalGraph::with_nodes(data.labels());
    g.add_edge("A", "C", Orientation::Extension).unwrap();
    let controller =
        RefinementController::new(Box::new(FixedTester(DirectionLabel::Backward)), 0.05);
    let report = controller.refine(&mut g, &data).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    let decision = &json["decisions"][0];
    assert_eq!(decision["source"], "A");
    assert_eq!(decision["action"], "reversed");
    assert_eq!(decision["result"]["label"], "backward");
}

#[test]
fn forward_and_inconclusive_labels_keep_edges() {
    let data = fork(50, 10);
    for label in [
        DirectionLabel::Forward,
        DirectionLabel::WeakForward,
        DirectionLabel::Inconclusive,
    ] {
        let mut g = CausalGraph::with_nodes(data.labels());
        g.add_edge("A", "C", Orientation::Extension).unwrap();
        let controller = RefinementController::new(Box::new(FixedTester(label)), 0.05);
        let report = controller.refine(&mut g, &data).unwrap();
        assert_eq!(report.decisions[0].action, EdgeAction::Kept);
        assert_eq!(report.confirmed_count(), 1);
        assert!(g.has_edge("A", "C"));
    }
}

/// Tester that reverses only the `A → C` edge.
struct FlipAToC;

impl IDirectionTester for FlipAToC {
    fn test_direction(&self, pair: &Dataset, _alpha: f64) -> AnmResult {
        let label = if pair.labels() == ["A", "C"] {
            DirectionLabel::Backward
        } else {
            DirectionLabel::Forward
        };
        AnmResult {
            label,
            p_forward: 0.0,
            p_backward: 0.0,
        }
    }
}

#[test]
fn reversal_closing_a_cycle_is_applied_and_flagged() {
    let data = fork(40, 19);
    let mut g = CausalGraph::with_nodes(data.labels());
    g.add_edge("A", "B", Orientation::Extension).unwrap();
    g.add_edge("B", "C", Orientation::Extension).unwrap();
    g.add_edge("A", "C", Orientation::Extension).unwrap();

    let controller = RefinementController::new(Box::new(FlipAToC), 0.05);
    let report = controller.refine(&mut g, &data).unwrap();

    assert!(g.has_edge("C", "A"));
    assert!(!g.has_edge("A", "C"));
    assert_eq!(report.reversed_count(), 1);
    let flipped: Vec<_> = report.decisions.iter().filter(|d| d.created_cycle).collect();
    assert_eq!(flipped.len(), 1);
    assert_eq!((flipped[0].source.as_str(), flipped[0].target.as_str()), ("A", "C"));
}

#[test]
fn refinement_is_idempotent() {
    let data = CausalModel::new(120, 11)
        .generate(Structure::Chain, 3)
        .unwrap();
    let controller = RefinementController::new(Box::new(small_anm()), 0.05);
    let mut graph = run_pc(&data, 0.05, CiTestMethod::PearsonCorrelation).unwrap();

    controller.refine(&mut graph, &data).unwrap();
    let after_first = graph.clone();
    let second = controller.refine(&mut graph, &data).unwrap();

    assert_eq!(second.reversed_count(), 0);
    assert_eq!(graph, after_first);
}

#[test]
fn parallel_mode_matches_sequential() {
    let data = CausalModel::new(120, 12)
        .generate(Structure::Fork, 4)
        .unwrap();
    let candidate = run_pc(&data, 0.05, CiTestMethod::PearsonCorrelation).unwrap();

    let mut sequential = candidate.clone();
    let mut parallel = candidate;
    RefinementController::new(Box::new(small_anm()), 0.05)
        .refine(&mut sequential, &data)
        .unwrap();
    RefinementController::new(Box::new(small_anm()), 0.05)
        .with_parallel(true)
        .refine(&mut parallel, &data)
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn refinement_never_adds_adjacencies() {
    let data = fork(300, 13);
    let candidate = run_pc(&data, 0.01, CiTestMethod::PearsonCorrelation).unwrap();
    let before = unordered(&candidate.edges());
    let refined = refine(Some(candidate), &data, 0.05).unwrap().unwrap();
    assert_eq!(unordered(&refined.edges()), before);
}

#[test]
fn unknown_endpoint_aborts_without_mutation() {
    let data = fork(30, 14);
    let mut graph = CausalGraph::with_nodes(&["A", "B", "C", "Z"]);
    graph.add_edge("A", "B", Orientation::Extension).unwrap();
    graph.add_edge("A", "Z", Orientation::Extension).unwrap();
    let before = graph.clone();

    let controller =
        RefinementController::new(Box::new(FixedTester(DirectionLabel::Backward)), 0.05);
    let err = controller.refine(&mut graph, &data).unwrap_err();
    assert!(matches!(
        err,
        PseeError::Data(DataError::UnknownVariable { ref label }) if label == "Z"
    ));
    assert_eq!(graph, before);
}

#[test]
fn sentinel_passes_through_refinement() {
    let data = fork(30, 15);
    assert!(refine(None, &data, 0.05).unwrap().is_none());
    let m = to_matrix(None, data.labels());
    assert_eq!(m.shape(), (3, 3));
    assert_eq!(m.edge_count(), 0);
}

// --- pipeline ---

#[test]
fn pipeline_reports_every_discovered_edge() {
    let mut config = PseeConfig::default();
    config.anm.max_samples = 120;
    let pipeline = HybridPipeline::from_config(&config);
    let data = fork(300, 16);

    let outcome = pipeline.run(&data).unwrap();
    let graph = outcome.graph.as_ref().unwrap();
    assert_eq!(outcome.report.decisions.len(), outcome.discovered_edges.len());
    assert_eq!(outcome.matrix.edge_count(), graph.edge_count());
    assert_eq!(unordered(&graph.edges()), unordered(&outcome.discovered_edges));
}

#[test]
fn batch_reports_each_dataset_independently() {
    let data = fork(40, 17);

    let mut bogus = CausalGraph::with_nodes(&["A", "Z"]);
    bogus.add_edge("A", "Z", Orientation::Extension).unwrap();

    let ok = HybridPipeline::new(
        Box::new(FixedLearner(Some(CausalGraph::with_nodes(data.labels())))),
        RefinementController::new(Box::new(FixedTester(DirectionLabel::Forward)), 0.05),
    );
    let failed = HybridPipeline::new(
        Box::new(FixedLearner(None)),
        RefinementController::new(Box::new(FixedTester(DirectionLabel::Forward)), 0.05),
    );
    let broken = HybridPipeline::new(
        Box::new(FixedLearner(Some(bogus))),
        RefinementController::new(Box::new(FixedTester(DirectionLabel::Forward)), 0.05),
    );

    assert_eq!(ok.run_batch([("a", &data)])[0].status, BatchStatus::Success);
    assert_eq!(
        failed.run_batch([("b", &data)])[0].status,
        BatchStatus::DiscoveryFailed
    );
    let entries = broken.run_batch([("c", &data), ("d", &data)]);
    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[1].status, BatchStatus::StructuralError(_)));
}
