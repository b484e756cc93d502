//! Additive noise model direction tester.
//!
//! For an ordered pair (first, second): regress second on first and first
//! on second, then test each residual against its regressor with HSIC. The
//! direction whose residuals look independent is the causal one.

pub mod decision;
pub mod hsic;
pub mod regression;

use psee_core::config::AnmConfig;
use psee_core::errors::PseeResult;
use psee_core::traits::IDirectionTester;
use psee_core::{AnmResult, Dataset};
use tracing::debug;

pub use decision::decide;
pub use hsic::{hsic_gamma_test, HsicTest};
pub use regression::{fit_residuals, GpFit};

/// Numerical failure inside one direction. Mapped to `p = 0` and never
/// propagated past [`AnmTester`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnmFailure {
    #[error("{role} column is constant")]
    DegenerateColumn { role: &'static str },
    #[error("{rows} rows is too few")]
    TooFewSamples { rows: usize },
    #[error("no grid point gave a positive definite kernel")]
    SingularKernel,
    #[error("non-finite {what}")]
    NonFinite { what: &'static str },
}

/// GP + HSIC direction tester.
#[derive(Debug, Clone)]
pub struct AnmTester {
    max_samples: usize,
    length_scales: Vec<f64>,
    noise_levels: Vec<f64>,
}

impl AnmTester {
    pub fn from_config(config: &AnmConfig) -> Self {
        Self {
            max_samples: config.max_samples,
            length_scales: config.length_scales.clone(),
            noise_levels: config.noise_levels.clone(),
        }
    }

    /// p-value that the residuals of `effect ~ f(cause)` are independent of
    /// `cause`. Failures give 0.0.
    pub fn direction_p_value(&self, cause: &[f64], effect: &[f64]) -> f64 {
        match self.try_direction_p_value(cause, effect) {
            Ok(p) => p,
            Err(failure) => {
                debug!(%failure, "ANM direction failed, scoring p = 0");
                0.0
            }
        }
    }

    fn try_direction_p_value(&self, cause: &[f64], effect: &[f64]) -> Result<f64, AnmFailure> {
        let fit = fit_residuals(cause, effect, &self.length_scales, &self.noise_levels)?;
        debug!(
            length_scale = fit.length_scale,
            noise = fit.noise,
            lml = fit.log_marginal_likelihood,
            "GP fit"
        );
        Ok(hsic_gamma_test(cause, &fit.residuals)?.p_value)
    }

    /// Test `first → second` against `second → first`.
    pub fn test_pair(&self, first: &[f64], second: &[f64], alpha: f64) -> AnmResult {
        let first = thin(first, self.max_samples);
        let second = thin(second, self.max_samples);
        let p_forward = self.direction_p_value(&first, &second);
        let p_backward = self.direction_p_value(&second, &first);
        AnmResult {
            label: decide(p_forward, p_backward, alpha),
            p_forward,
            p_backward,
        }
    }
}

impl Default for AnmTester {
    fn default() -> Self {
        Self::from_config(&AnmConfig::default())
    }
}

impl IDirectionTester for AnmTester {
    fn test_direction(&self, pair: &Dataset, alpha: f64) -> AnmResult {
        self.test_pair(pair.column_at(0), pair.column_at(1), alpha)
    }
}

/// Keep every `ceil(n / max)`-th row when `n > max`.
pub fn thin(values: &[f64], max_samples: usize) -> Vec<f64> {
    if max_samples == 0 || values.len() <= max_samples {
        return values.to_vec();
    }
    let stride = values.len().div_ceil(max_samples);
    values.iter().step_by(stride).copied().collect()
}

/// `test_direction(data, var_a, var_b, α)` with the default tester.
pub fn test_direction(
    data: &Dataset,
    var_a: &str,
    var_b: &str,
    alpha: f64,
) -> PseeResult<AnmResult> {
    let pair = data.select(&[var_a, var_b])?;
    Ok(AnmTester::default().test_direction(&pair, alpha))
}
