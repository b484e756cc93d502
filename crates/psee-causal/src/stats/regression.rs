use nalgebra::{DMatrix, DVector};

use super::descriptive::mean;

/// Residuals of `y` after least squares on an intercept plus `regressors`.
///
/// Solved through the SVD so collinear regressors degrade to the minimum-norm
/// solution instead of failing. `None` on length mismatch or a failed solve.
pub fn ols_residuals(y: &[f64], regressors: &[&[f64]]) -> Option<Vec<f64>> {
    let n = y.len();
    if regressors.iter().any(|r| r.len() != n) {
        return None;
    }
    if regressors.is_empty() {
        let m = mean(y);
        return Some(y.iter().map(|v| v - m).collect());
    }

    let k = regressors.len() + 1;
    let design = DMatrix::from_fn(n, k, |row, col| {
        if col == 0 {
            1.0
        } else {
            regressors[col - 1][row]
        }
    });
    let target = DVector::from_column_slice(y);
    let svd = design.clone().svd(true, true);
    let beta = svd.solve(&target, 1e-12).ok()?;
    let fitted = design * beta;

    let residuals: Vec<f64> = target.iter().zip(fitted.iter()).map(|(t, f)| t - f).collect();
    residuals.iter().all(|r| r.is_finite()).then_some(residuals)
}
