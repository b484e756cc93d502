//! Property tests for psee-causal: graph invariants, decision rule,
//! adjacency extraction and refinement.

use proptest::prelude::*;

use psee_causal::anm::decide;
use psee_causal::graph::{dag_enforcement, CausalGraph, Orientation};
use psee_causal::refinement::RefinementController;
use psee_causal::stats::quantile_levels;
use psee_causal::{run_pc, to_matrix};
use psee_core::traits::IDirectionTester;
use psee_core::{AnmResult, CiTestMethod, Dataset, DirectionLabel};

const LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Build a graph over `n` labels from proposed edges, skipping self-loops,
/// reverse duplicates and cycle-closing edges.
fn build_dag(n: usize, edges: &[(usize, usize)]) -> CausalGraph {
    let mut graph = CausalGraph::with_nodes(&LABELS[..n]);
    for &(s, t) in edges {
        if s >= n || t >= n || s == t {
            continue;
        }
        let (si, ti) = (
            graph.get_node(LABELS[s]).unwrap(),
            graph.get_node(LABELS[t]).unwrap(),
        );
        if !dag_enforcement::would_create_cycle(&graph, si, ti) {
            let _ = graph.add_edge(LABELS[s], LABELS[t], Orientation::Extension);
        }
    }
    graph
}

fn edge_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..4usize, 0..4usize), 0..12)
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (2..=4usize, 8..40usize).prop_flat_map(|(vars, rows)| {
        prop::collection::vec(prop::collection::vec(-10.0f64..10.0, rows), vars)
            .prop_map(|columns| Dataset::from_columns(columns).unwrap())
    })
}

/// Tester answering from the p-values fixed at construction, keyed on
/// column order, so swapping a pair swaps the answer.
struct SymmetricTester {
    alpha_weights: [f64; 4],
}

impl IDirectionTester for SymmetricTester {
    fn test_direction(&self, pair: &Dataset, alpha: f64) -> AnmResult {
        let weight = |label: &str| {
            let i = LABELS.iter().position(|l| *l == label).unwrap_or(0);
            self.alpha_weights[i]
        };
        let p_forward = weight(&pair.labels()[0]);
        let p_backward = weight(&pair.labels()[1]);
        AnmResult {
            label: decide(p_forward, p_backward, alpha),
            p_forward,
            p_backward,
        }
    }
}

proptest! {
    #[test]
    fn built_graphs_are_acyclic(edges in edge_strategy()) {
        let graph = build_dag(4, &edges);
        prop_assert!(dag_enforcement::find_cycles(&graph).is_empty());
    }

    #[test]
    fn at_most_one_edge_per_pair(edges in edge_strategy()) {
        let mut graph = CausalGraph::with_nodes(&LABELS);
        for (s, t) in edges {
            let _ = graph.add_edge(LABELS[s], LABELS[t], Orientation::Extension);
        }
        for (s, t) in graph.edges() {
            prop_assert!(s != t);
            prop_assert!(!graph.has_edge(&t, &s));
        }
    }

    #[test]
    fn matrix_mirrors_edges(edges in edge_strategy()) {
        let graph = build_dag(4, &edges);
        let m = to_matrix(Some(&graph), &LABELS);
        prop_assert_eq!(m.shape(), (4, 4));
        prop_assert_eq!(m.edge_count(), graph.edge_count());
        for (s, t) in graph.edges() {
            prop_assert_eq!(m.get(&s, &t), Some(1));
            prop_assert_eq!(m.get(&t, &s), Some(0));
        }
    }

    #[test]
    fn decision_is_antisymmetric(pf in 0.0f64..1.0, pb in 0.0f64..1.0, alpha in 0.0f64..1.0) {
        let ab = decide(pf, pb, alpha);
        let ba = decide(pb, pf, alpha);
        let mirrored = match ab {
            DirectionLabel::Forward => DirectionLabel::Backward,
            DirectionLabel::Backward => DirectionLabel::Forward,
            DirectionLabel::WeakForward => DirectionLabel::WeakBackward,
            DirectionLabel::WeakBackward => DirectionLabel::WeakForward,
            DirectionLabel::Inconclusive => DirectionLabel::Inconclusive,
        };
        prop_assert_eq!(ba, mirrored);
    }

    #[test]
    fn second_refinement_flips_nothing(
        edges in edge_strategy(),
        weights in prop::array::uniform4(0.0f64..1.0),
    ) {
        let data = Dataset::from_columns(vec![vec![0.0, 1.0, 2.0]; 4]).unwrap();
        let mut graph = build_dag(4, &edges);
        let before = graph.edges().len();
        let controller =
            RefinementController::new(Box::new(SymmetricTester { alpha_weights: weights }), 0.05);
        controller.refine(&mut graph, &data).unwrap();
        let second = controller.refine(&mut graph, &data).unwrap();
        prop_assert_eq!(second.reversed_count(), 0);
        prop_assert_eq!(graph.edge_count(), before);
    }

    #[test]
    fn pc_covers_every_column(data in dataset_strategy(), alpha in 0.0f64..=1.0) {
        let graph = run_pc(&data, alpha, CiTestMethod::PearsonCorrelation).unwrap();
        let mut labels = graph.node_labels();
        labels.sort();
        let mut expected = data.labels().to_vec();
        expected.sort();
        prop_assert_eq!(labels, expected);
        prop_assert!(graph.edge_count() <= data.n_vars() * (data.n_vars() - 1) / 2);
    }

    #[test]
    fn quantile_levels_stay_in_range(xs in prop::collection::vec(-5.0f64..5.0, 1..60), bins in 2..6usize) {
        let levels = quantile_levels(&xs, bins);
        prop_assert_eq!(levels.len(), xs.len());
        prop_assert!(levels.iter().all(|&l| l < bins));
    }
}
