//! Conditional independence oracle: Pearson correlation, Fisher-Z, chi-square.

pub mod chi_square;
pub mod fisher_z;
pub mod pearson;

use psee_core::config::DiscoveryConfig;
use psee_core::config::defaults::DEFAULT_CHI_SQUARE_BINS;
use psee_core::errors::PseeResult;
use psee_core::traits::IIndependenceTest;
use psee_core::{CiTestMethod, Dataset};

/// Independence oracle dispatching on [`CiTestMethod`].
#[derive(Debug, Clone, Copy)]
pub struct IndependenceOracle {
    method: CiTestMethod,
    chi_square_bins: usize,
}

impl IndependenceOracle {
    pub fn new(method: CiTestMethod) -> Self {
        Self {
            method,
            chi_square_bins: DEFAULT_CHI_SQUARE_BINS,
        }
    }

    /// Override the chi-square discretisation levels.
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.chi_square_bins = bins.max(2);
        self
    }

    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(config.ci_test).with_bins(config.chi_square_bins)
    }

    pub fn method(&self) -> CiTestMethod {
        self.method
    }

    /// p-value by column position. Positions must be valid for `data`.
    pub fn test_indices(&self, data: &Dataset, x: usize, y: usize, conditioning: &[usize]) -> f64 {
        let z: Vec<&[f64]> = conditioning.iter().map(|&i| data.column_at(i)).collect();
        let (xs, ys) = (data.column_at(x), data.column_at(y));
        let p = match self.method {
            CiTestMethod::PearsonCorrelation => pearson::p_value(xs, ys, &z),
            CiTestMethod::FisherZ => fisher_z::p_value(xs, ys, &z),
            CiTestMethod::ChiSquare => chi_square::p_value(xs, ys, &z, self.chi_square_bins),
        };
        if p.is_finite() {
            p.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl Default for IndependenceOracle {
    fn default() -> Self {
        Self::new(CiTestMethod::default())
    }
}

impl IIndependenceTest for IndependenceOracle {
    fn p_value(
        &self,
        data: &Dataset,
        x: &str,
        y: &str,
        conditioning: &[&str],
    ) -> PseeResult<f64> {
        let xi = data.require_index(x)?;
        let yi = data.require_index(y)?;
        let zi = conditioning
            .iter()
            .map(|label| data.require_index(label))
            .collect::<PseeResult<Vec<_>>>()?;
        Ok(self.test_indices(data, xi, yi, &zi))
    }
}

/// `test(data, var_i, var_j, conditioning_set, method) -> p_value`.
pub fn test(
    data: &Dataset,
    x: &str,
    y: &str,
    conditioning: &[&str],
    method: CiTestMethod,
) -> PseeResult<f64> {
    IndependenceOracle::new(method).p_value(data, x, y, conditioning)
}
