/// Smallest number of variables a dataset may carry.
pub const MIN_VARIABLES: usize = 2;

/// Largest number of variables a dataset may carry.
pub const MAX_VARIABLES: usize = 4;

/// Standard deviations below this are treated as a constant column.
pub const DEGENERATE_STD: f64 = 1e-10;

/// Column labels assigned by position.
pub const VARIABLE_LABELS: [&str; MAX_VARIABLES] = ["A", "B", "C", "D"];
