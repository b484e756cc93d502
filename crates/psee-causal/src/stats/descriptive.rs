use psee_core::constants::DEGENERATE_STD;

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation.
pub fn std_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    (xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64).sqrt()
}

/// Z-score a column. `None` for near-constant or non-finite input.
pub fn standardize(xs: &[f64]) -> Option<Vec<f64>> {
    let sd = std_dev(xs);
    if !sd.is_finite() || sd < DEGENERATE_STD {
        return None;
    }
    let m = mean(xs);
    Some(xs.iter().map(|x| (x - m) / sd).collect())
}

/// Pearson correlation clamped to [-1, 1].
/// `None` when lengths differ, fewer than two points, or a column is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let (mx, my) = (mean(x), mean(y));
    let (mut cov, mut var_x, mut var_y) = (0.0f64, 0.0f64, 0.0f64);
    for (xi, yi) in x.iter().zip(y) {
        let (dx, dy) = (xi - mx, yi - my);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let n = x.len() as f64;
    if (var_x / n).sqrt() < DEGENERATE_STD || (var_y / n).sqrt() < DEGENERATE_STD {
        return None;
    }
    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Median of the values (reorders the slice). `None` when empty.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
