use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::CiTestMethod;

/// Skeleton/orientation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Significance level for the conditional independence tests.
    pub alpha: f64,
    /// Independence test used by the PC search.
    pub ci_test: CiTestMethod,
    /// Discretisation levels per variable for the chi-square test.
    pub chi_square_bins: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            alpha: defaults::DEFAULT_ALPHA,
            ci_test: CiTestMethod::default(),
            chi_square_bins: defaults::DEFAULT_CHI_SQUARE_BINS,
        }
    }
}
