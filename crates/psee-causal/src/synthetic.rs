//! Seeded generators for the benchmark structures.
//!
//! Three-variable datasets put X, Y, Z in columns A, B, C. Four-variable
//! datasets put W, X, Y, Z in columns A, B, C, D. Every structural equation
//! adds N(0, 0.5²) noise.

use std::fmt;
use std::str::FromStr;

use psee_core::errors::{DataError, PseeResult};
use psee_core::Dataset;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};
use serde::{Deserialize, Serialize};

/// Observations per generated dataset unless overridden.
pub const DEFAULT_SAMPLES: usize = 1000;

const NOISE_STD: f64 = 0.5;

/// Benchmark causal structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    Fork,
    Collider,
    Chain,
}

impl Structure {
    pub const ALL: [Structure; 3] = [Self::Fork, Self::Collider, Self::Chain];

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fork" => Some(Self::Fork),
            "collider" => Some(Self::Collider),
            "chain" => Some(Self::Chain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fork => "fork",
            Self::Collider => "collider",
            Self::Chain => "chain",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Structure {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_name(s).ok_or_else(|| DataError::Parse {
            reason: format!("unknown structure '{s}'"),
        })
    }
}

/// True edges of a generated structure, in column labels.
pub fn ground_truth_edges(structure: Structure, nodes: usize) -> Vec<(&'static str, &'static str)> {
    match (structure, nodes) {
        (Structure::Fork, 3) => vec![("C", "A"), ("C", "B")],
        (Structure::Collider, 3) => vec![("A", "C"), ("B", "C")],
        (Structure::Chain, 3) => vec![("A", "C"), ("C", "B")],
        (Structure::Fork, 4) => vec![("A", "B"), ("A", "C"), ("A", "D")],
        (Structure::Collider, 4) => vec![("B", "A"), ("C", "A"), ("A", "D")],
        (Structure::Chain, 4) => vec![("B", "A"), ("A", "C"), ("C", "D")],
        _ => Vec::new(),
    }
}

/// Seeded sampler for the benchmark structures.
pub struct CausalModel {
    n_samples: usize,
    rng: ChaCha8Rng,
}

impl CausalModel {
    pub fn new(n_samples: usize, seed: u64) -> Self {
        Self {
            n_samples,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Sample `structure` over 3 or 4 variables.
    pub fn generate(&mut self, structure: Structure, nodes: usize) -> PseeResult<Dataset> {
        let columns = match (structure, nodes) {
            (Structure::Fork, 3) => {
                let z = self.standard();
                let x = self.linear(&[(2.0, &z)]);
                let y = self.linear(&[(-1.5, &z)]);
                vec![x, y, z]
            }
            (Structure::Collider, 3) => {
                let x = self.standard();
                let y = self.standard();
                let z = self.linear(&[(1.5, &x), (2.0, &y)]);
                vec![x, y, z]
            }
            (Structure::Chain, 3) => {
                let x = self.standard();
                let z = self.linear(&[(1.5, &x)]);
                let y = self.linear(&[(2.0, &z)]);
                vec![x, y, z]
            }
            (Structure::Fork, 4) => {
                let w = self.standard();
                let x = self.linear(&[(2.0, &w)]);
                let y = self.linear(&[(-1.5, &w)]);
                let z = self.linear(&[(1.2, &w)]);
                vec![w, x, y, z]
            }
            (Structure::Collider, 4) => {
                let x = self.standard();
                let y = self.standard();
                let w = self.linear(&[(1.5, &x), (2.0, &y)]);
                let z = self.linear(&[(1.3, &w)]);
                vec![w, x, y, z]
            }
            (Structure::Chain, 4) => {
                let x = self.standard();
                let w = self.linear(&[(1.5, &x)]);
                let y = self.linear(&[(2.0, &w)]);
                let z = self.linear(&[(1.2, &y)]);
                vec![w, x, y, z]
            }
            (_, count) => {
                return Err(DataError::UnsupportedDimension {
                    count,
                    min: 3,
                    max: 4,
                }
                .into())
            }
        };
        Dataset::from_columns(columns)
    }

    /// Non-linear additive-noise pair A → B: `B = A³ + U(−1, 1)` with
    /// `A ~ U(−2, 2)`.
    pub fn anm_pair(&mut self) -> PseeResult<Dataset> {
        let cause_dist = Uniform::new(-2.0, 2.0);
        let noise_dist = Uniform::new(-1.0, 1.0);
        let a: Vec<f64> = (0..self.n_samples)
            .map(|_| cause_dist.sample(&mut self.rng))
            .collect();
        let b: Vec<f64> = a
            .iter()
            .map(|x| x.powi(3) + noise_dist.sample(&mut self.rng))
            .collect();
        Dataset::from_columns(vec![a, b])
    }

    /// Independent pair with no causal link.
    pub fn independent_pair(&mut self) -> PseeResult<Dataset> {
        let a = self.standard();
        let b: Vec<f64> = (0..self.n_samples).map(|_| self.rng.gen_range(-1.0..1.0)).collect();
        Dataset::from_columns(vec![a, b])
    }

    fn standard(&mut self) -> Vec<f64> {
        self.gaussian(1.0)
    }

    fn gaussian(&mut self, std: f64) -> Vec<f64> {
        (0..self.n_samples)
            .map(|_| {
                let z: f64 = self.rng.sample(StandardNormal);
                z * std
            })
            .collect()
    }

    /// Σ coef·parent + noise.
    fn linear(&mut self, terms: &[(f64, &Vec<f64>)]) -> Vec<f64> {
        let mut out = self.gaussian(NOISE_STD);
        for (coef, parent) in terms {
            for (o, p) in out.iter_mut().zip(parent.iter()) {
                *o += coef * p;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_data() {
        let a = CausalModel::new(50, 7).generate(Structure::Fork, 3).unwrap();
        let b = CausalModel::new(50, 7).generate(Structure::Fork, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shapes_follow_node_count() {
        let mut model = CausalModel::new(20, 1);
        for structure in Structure::ALL {
            assert_eq!(model.generate(structure, 3).unwrap().n_vars(), 3);
            assert_eq!(model.generate(structure, 4).unwrap().labels(), &["A", "B", "C", "D"]);
        }
        assert!(model.generate(Structure::Chain, 2).is_err());
    }

    #[test]
    fn ground_truth_has_expected_sizes() {
        assert_eq!(ground_truth_edges(Structure::Collider, 3).len(), 2);
        assert_eq!(ground_truth_edges(Structure::Chain, 4).len(), 3);
        assert!(ground_truth_edges(Structure::Fork, 2).is_empty());
    }

    #[test]
    fn structure_names_parse() {
        assert_eq!("Fork".parse::<Structure>().unwrap(), Structure::Fork);
        assert!("tree".parse::<Structure>().is_err());
    }
}
