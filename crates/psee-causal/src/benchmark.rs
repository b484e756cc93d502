//! Scoring against ground truth.

use std::collections::BTreeMap;

use psee_core::errors::{ConfigError, PseeResult};
use psee_core::{AdjacencyMatrix, ExpectedDirection};
use serde::{Deserialize, Serialize};

use crate::graph::CausalGraph;

/// Per-dataset verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    NotScored,
}

/// Score a two-variable matrix (labels A, B) against the expected label.
///
/// `Ind/Confounder` is correct only when no edge was kept; `Unknown` is never
/// scored.
pub fn score(matrix: &AdjacencyMatrix, expected: ExpectedDirection) -> Verdict {
    let ab = matrix.get("A", "B") == Some(1);
    let ba = matrix.get("B", "A") == Some(1);
    let correct = match expected {
        ExpectedDirection::Forward => ab && !ba,
        ExpectedDirection::Backward => ba && !ab,
        ExpectedDirection::IndependentOrConfounded => !ab && !ba,
        ExpectedDirection::Unknown => return Verdict::NotScored,
    };
    if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Running tally over a benchmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub not_scored: usize,
}

impl BenchmarkSummary {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Correct => self.correct += 1,
            Verdict::Incorrect => self.incorrect += 1,
            Verdict::NotScored => self.not_scored += 1,
        }
    }

    pub fn scored(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Fraction correct among scored datasets; `None` when nothing was scored.
    pub fn accuracy(&self) -> Option<f64> {
        match self.scored() {
            0 => None,
            n => Some(self.correct as f64 / n as f64),
        }
    }
}

/// Dataset id → expected direction, read from a `[pairs]` TOML table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTruth {
    pub pairs: BTreeMap<String, ExpectedDirection>,
}

#[derive(Deserialize)]
struct GroundTruthFile {
    #[serde(default)]
    pairs: BTreeMap<String, String>,
}

impl GroundTruth {
    /// Labels are parsed leniently; anything unrecognised is `Unknown`.
    pub fn from_toml(source: &str) -> PseeResult<Self> {
        let file: GroundTruthFile = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        let pairs = file
            .pairs
            .into_iter()
            .map(|(id, label)| (id, ExpectedDirection::from_label(&label)))
            .collect();
        Ok(Self { pairs })
    }

    /// Expected direction for `id`; missing ids are `Unknown`.
    pub fn expected(&self, id: &str) -> ExpectedDirection {
        self.pairs
            .get(id)
            .copied()
            .unwrap_or(ExpectedDirection::Unknown)
    }
}

/// Edge-level comparison of a recovered graph with the true edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EdgeScore {
    /// Present with the right direction.
    pub correct: usize,
    /// Present with the wrong direction.
    pub reversed: usize,
    /// True edges with no counterpart.
    pub missing: usize,
    /// Recovered edges joining a pair with no true edge.
    pub extra: usize,
}

pub fn score_edges(graph: Option<&CausalGraph>, truth: &[(&str, &str)]) -> EdgeScore {
    let edges = graph.map(CausalGraph::edges).unwrap_or_default();
    let has = |a: &str, b: &str| edges.iter().any(|(s, t)| s == a && t == b);

    let mut score = EdgeScore::default();
    for &(a, b) in truth {
        if has(a, b) {
            score.correct += 1;
        } else if has(b, a) {
            score.reversed += 1;
        } else {
            score.missing += 1;
        }
    }
    score.extra = edges
        .iter()
        .filter(|(s, t)| {
            !truth
                .iter()
                .any(|&(a, b)| (a == s && b == t) || (a == t && b == s))
        })
        .count();
    score
}
