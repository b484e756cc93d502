//! Fisher's z-transform of the partial correlation.

use statrs::distribution::{ContinuousCDF, Normal};

use super::pearson::PERFECT_CORRELATION_SLACK;
use crate::stats::{ols_residuals, pearson};

/// p-value for `x ⫫ y | z` from z = atanh(r)·√(n − |z| − 3).
pub fn p_value(x: &[f64], y: &[f64], z: &[&[f64]]) -> f64 {
    let n = x.len();
    if n < z.len() + 4 {
        return 1.0;
    }
    let (Some(rx), Some(ry)) = (ols_residuals(x, z), ols_residuals(y, z)) else {
        return 1.0;
    };
    let Some(r) = pearson(&rx, &ry) else {
        return 1.0;
    };
    if 1.0 - r * r <= PERFECT_CORRELATION_SLACK {
        return 0.0;
    }

    let df = (n - z.len() - 3) as f64;
    let statistic = r.atanh() * df.sqrt();
    match Normal::new(0.0, 1.0) {
        Ok(normal) => 2.0 * normal.sf(statistic.abs()),
        Err(_) => 1.0,
    }
}
