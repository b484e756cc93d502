//! Pearson correlation of OLS residuals with a two-sided Student-t tail.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::stats::{ols_residuals, pearson};

/// 1 − r² below this is treated as perfect correlation.
pub(crate) const PERFECT_CORRELATION_SLACK: f64 = 1e-12;

/// p-value for `x ⫫ y | z`.
///
/// Residualises both variables on `z`, correlates the residuals and tests
/// with n−2 degrees of freedom. Constant residuals give 1.0, perfect
/// correlation gives 0.0.
pub fn p_value(x: &[f64], y: &[f64], z: &[&[f64]]) -> f64 {
    let n = x.len();
    if n < 3 {
        return 1.0;
    }
    let (Some(rx), Some(ry)) = (ols_residuals(x, z), ols_residuals(y, z)) else {
        return 1.0;
    };
    let Some(r) = pearson(&rx, &ry) else {
        return 1.0;
    };

    let df = (n - 2) as f64;
    let slack = 1.0 - r * r;
    if slack <= PERFECT_CORRELATION_SLACK {
        return 0.0;
    }
    let t = r * (df / slack).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * dist.sf(t.abs()),
        Err(_) => 1.0,
    }
}
