use crate::models::{AnmResult, Dataset};

/// Pairwise causal direction test.
pub trait IDirectionTester: Send + Sync {
    /// Test the pair formed by the first two columns of `pair`: forward means
    /// column 0 → column 1. Never fails; numerical trouble shows up as weak
    /// p-values.
    fn test_direction(&self, pair: &Dataset, alpha: f64) -> AnmResult;
}
