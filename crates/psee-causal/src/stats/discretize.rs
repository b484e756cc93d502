/// Equal-frequency discretisation into at most `bins` levels.
///
/// Cut points are taken at the empirical quantiles; ties always share a
/// level, so a constant column collapses to a single level.
pub fn quantile_levels(xs: &[f64], bins: usize) -> Vec<usize> {
    if xs.is_empty() || bins < 2 {
        return vec![0; xs.len()];
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mut cuts: Vec<f64> = (1..bins).map(|k| sorted[(k * n / bins).min(n - 1)]).collect();
    cuts.dedup();
    // A cut at the minimum would leave level 0 empty.
    cuts.retain(|c| *c > sorted[0]);

    xs.iter()
        .map(|x| cuts.iter().filter(|c| x >= c).count())
        .collect()
}
