//! Gaussian-process regression with an RBF kernel.
//!
//! Both columns are z-scored; (length-scale, noise) is picked from a fixed
//! grid by log marginal likelihood. Residuals are `y − E[f | y]`, which for
//! a GP equals `noise · K⁻¹ y`.

use nalgebra::{DMatrix, DVector};

use super::AnmFailure;
use crate::stats::standardize;

/// Fewest rows the regression accepts.
pub const MIN_SAMPLES: usize = 10;

/// Best grid point and its residuals.
#[derive(Debug, Clone)]
pub struct GpFit {
    pub length_scale: f64,
    pub noise: f64,
    pub log_marginal_likelihood: f64,
    pub residuals: Vec<f64>,
}

/// Regress `y` on `x` and return the residuals of the best fit.
pub fn fit_residuals(
    x: &[f64],
    y: &[f64],
    length_scales: &[f64],
    noise_levels: &[f64],
) -> Result<GpFit, AnmFailure> {
    if x.len() < MIN_SAMPLES || x.len() != y.len() {
        return Err(AnmFailure::TooFewSamples { rows: x.len() });
    }
    let xs = standardize(x).ok_or(AnmFailure::DegenerateColumn { role: "regressor" })?;
    let ys = standardize(y).ok_or(AnmFailure::DegenerateColumn { role: "target" })?;

    let n = xs.len();
    let target = DVector::from_vec(ys);
    let distances = squared_distances(&xs);
    let normaliser = 0.5 * n as f64 * (2.0 * std::f64::consts::PI).ln();

    let mut best: Option<GpFit> = None;
    for &length_scale in length_scales {
        let two_l2 = 2.0 * length_scale * length_scale;
        for &noise in noise_levels {
            let mut kernel = distances.map(|d| (-d / two_l2).exp());
            for i in 0..n {
                kernel[(i, i)] += noise;
            }
            let Some(chol) = kernel.cholesky() else {
                continue;
            };
            let weights = chol.solve(&target);
            let log_det: f64 = 2.0 * chol.l_dirty().diagonal().iter().map(|v| v.ln()).sum::<f64>();
            let lml = -0.5 * target.dot(&weights) - 0.5 * log_det - normaliser;
            if !lml.is_finite() {
                continue;
            }
            if best
                .as_ref()
                .map_or(true, |fit| lml > fit.log_marginal_likelihood)
            {
                best = Some(GpFit {
                    length_scale,
                    noise,
                    log_marginal_likelihood: lml,
                    residuals: weights.iter().map(|w| w * noise).collect(),
                });
            }
        }
    }

    best.ok_or(AnmFailure::SingularKernel)
}

/// Pairwise squared distances of a 1-D sample.
pub(crate) fn squared_distances(xs: &[f64]) -> DMatrix<f64> {
    let n = xs.len();
    DMatrix::from_fn(n, n, |i, j| (xs[i] - xs[j]).powi(2))
}
