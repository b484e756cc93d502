//! Numeric helpers shared by the independence oracle and the ANM tester.

pub mod descriptive;
pub mod discretize;
pub mod regression;

pub use descriptive::{mean, median, pearson, standardize, std_dev};
pub use discretize::quantile_levels;
pub use regression::ols_residuals;
