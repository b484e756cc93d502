//! Stratified chi-square test on equal-frequency discretised data.

use std::collections::BTreeMap;

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::stats::quantile_levels;

/// p-value for `x ⫫ y | z`.
///
/// Every variable is cut into `bins` levels; one contingency table per joint
/// level of `z`; statistics and degrees of freedom are summed over strata.
/// No usable stratum yields 1.0.
pub fn p_value(x: &[f64], y: &[f64], z: &[&[f64]], bins: usize) -> f64 {
    let lx = quantile_levels(x, bins);
    let ly = quantile_levels(y, bins);
    let lz: Vec<Vec<usize>> = z.iter().map(|col| quantile_levels(col, bins)).collect();

    let mut strata: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for row in 0..x.len() {
        let key = lz.iter().fold(0, |acc, levels| acc * bins + levels[row]);
        strata.entry(key).or_default().push(row);
    }

    let mut statistic = 0.0;
    let mut dof = 0usize;
    for rows in strata.values() {
        let (s, d) = stratum_statistic(rows, &lx, &ly, bins);
        statistic += s;
        dof += d;
    }

    if dof == 0 {
        return 1.0;
    }
    match ChiSquared::new(dof as f64) {
        Ok(dist) => dist.sf(statistic),
        Err(_) => 1.0,
    }
}

fn stratum_statistic(rows: &[usize], lx: &[usize], ly: &[usize], bins: usize) -> (f64, usize) {
    let mut table = vec![vec![0.0f64; bins]; bins];
    for &row in rows {
        table[lx[row]][ly[row]] += 1.0;
    }
    let row_totals: Vec<f64> = table.iter().map(|r| r.iter().sum()).collect();
    let col_totals: Vec<f64> = (0..bins).map(|j| table.iter().map(|r| r[j]).sum()).collect();

    let occupied_rows = row_totals.iter().filter(|t| **t > 0.0).count();
    let occupied_cols = col_totals.iter().filter(|t| **t > 0.0).count();
    if occupied_rows < 2 || occupied_cols < 2 {
        return (0.0, 0);
    }

    let total = rows.len() as f64;
    let mut statistic = 0.0;
    for (i, row) in table.iter().enumerate() {
        for (j, observed) in row.iter().enumerate() {
            let expected = row_totals[i] * col_totals[j] / total;
            if expected > 0.0 {
                statistic += (observed - expected).powi(2) / expected;
            }
        }
    }
    (statistic, (occupied_rows - 1) * (occupied_cols - 1))
}
