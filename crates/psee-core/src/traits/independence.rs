use crate::errors::PseeResult;
use crate::models::Dataset;

/// Conditional independence oracle.
pub trait IIndependenceTest: Send + Sync {
    /// p-value for the null hypothesis `x ⫫ y | conditioning`.
    ///
    /// Numerical degeneracy yields a p-value, never an error. Unknown labels
    /// are an error.
    fn p_value(&self, data: &Dataset, x: &str, y: &str, conditioning: &[&str])
        -> PseeResult<f64>;
}
