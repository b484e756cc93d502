//! HSIC independence test with a gamma approximation to the null.

use nalgebra::DMatrix;
use statrs::distribution::{ContinuousCDF, Gamma};

use super::regression::squared_distances;
use super::AnmFailure;
use crate::stats::median;

/// HSIC statistic and its p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsicTest {
    pub statistic: f64,
    pub p_value: f64,
}

/// Test `x ⫫ y` with Gaussian kernels whose widths follow the median
/// heuristic. Needs at least six observations.
pub fn hsic_gamma_test(x: &[f64], y: &[f64]) -> Result<HsicTest, AnmFailure> {
    let n = x.len();
    if n < 6 || n != y.len() {
        return Err(AnmFailure::TooFewSamples { rows: n });
    }
    let kx = gaussian_gram(x).ok_or(AnmFailure::DegenerateColumn { role: "regressor" })?;
    let ky = gaussian_gram(y).ok_or(AnmFailure::DegenerateColumn { role: "residual" })?;
    let kxc = centre(&kx);
    let kyc = centre(&ky);

    let nf = n as f64;
    let product = kxc.component_mul(&kyc);
    let statistic = product.sum() / nf;

    let scaled = product.map(|v| (v / 6.0).powi(2));
    let mut variance = (scaled.sum() - scaled.trace()) / nf / (nf - 1.0);
    variance *= 72.0 * (nf - 4.0) * (nf - 5.0) / nf / (nf - 1.0) / (nf - 2.0) / (nf - 3.0);

    let mu_x = off_diagonal_mean(&kx);
    let mu_y = off_diagonal_mean(&ky);
    let mean = (1.0 + mu_x * mu_y - mu_x - mu_y) / nf;

    if !(variance.is_finite() && mean.is_finite()) || variance <= 0.0 || mean <= 0.0 {
        return Err(AnmFailure::NonFinite { what: "null moments" });
    }
    let shape = mean * mean / variance;
    let scale = variance * nf / mean;
    let gamma = Gamma::new(shape, 1.0 / scale)
        .map_err(|_| AnmFailure::NonFinite { what: "gamma parameters" })?;
    let p_value = gamma.sf(statistic);
    if !p_value.is_finite() {
        return Err(AnmFailure::NonFinite { what: "p-value" });
    }

    Ok(HsicTest {
        statistic,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

/// Gaussian Gram matrix, width² = ½·median of the positive squared
/// distances. `None` when every point coincides.
fn gaussian_gram(xs: &[f64]) -> Option<DMatrix<f64>> {
    let distances = squared_distances(xs);
    let mut positive: Vec<f64> = distances.iter().copied().filter(|d| *d > 0.0).collect();
    let width2 = 0.5 * median(&mut positive)?;
    if !(width2.is_finite() && width2 > 0.0) {
        return None;
    }
    Some(distances.map(|d| (-0.5 * d / width2).exp()))
}

/// `H K H` with `H = I − 11ᵀ/n`.
fn centre(k: &DMatrix<f64>) -> DMatrix<f64> {
    let n = k.nrows();
    let nf = n as f64;
    let row_means: Vec<f64> = (0..n).map(|i| k.row(i).sum() / nf).collect();
    let grand = row_means.iter().sum::<f64>() / nf;
    DMatrix::from_fn(n, n, |i, j| k[(i, j)] - row_means[i] - row_means[j] + grand)
}

fn off_diagonal_mean(k: &DMatrix<f64>) -> f64 {
    let n = k.nrows() as f64;
    (k.sum() - k.trace()) / n / (n - 1.0)
}
