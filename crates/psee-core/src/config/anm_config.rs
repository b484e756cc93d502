use serde::{Deserialize, Serialize};

use super::defaults;

/// Additive noise model tester configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnmConfig {
    /// Threshold separating confident from weak direction decisions.
    pub alpha: f64,
    /// Rows above this count are thinned by a fixed stride before fitting.
    pub max_samples: usize,
    /// Candidate RBF length-scales (in standard deviations of the regressor).
    pub length_scales: Vec<f64>,
    /// Candidate observation noise variances.
    pub noise_levels: Vec<f64>,
    /// Run per-edge tests on the rayon pool. Mutations stay serialised.
    pub parallel_edges: bool,
}

impl Default for AnmConfig {
    fn default() -> Self {
        Self {
            alpha: defaults::DEFAULT_ANM_ALPHA,
            max_samples: defaults::DEFAULT_MAX_SAMPLES,
            length_scales: defaults::DEFAULT_LENGTH_SCALES.to_vec(),
            noise_levels: defaults::DEFAULT_NOISE_LEVELS.to_vec(),
            parallel_edges: defaults::DEFAULT_PARALLEL_EDGES,
        }
    }
}
