use serde::{Deserialize, Serialize};

use crate::errors::DiscoveryError;

/// Conditional independence test used by the skeleton search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CiTestMethod {
    /// Pearson correlation of OLS residuals, Student-t tail. Best for continuous data.
    #[default]
    #[serde(rename = "pearsonr", alias = "pearson")]
    PearsonCorrelation,
    /// Fisher's z-transform of the partial correlation, normal tail.
    #[serde(rename = "fisher-z", alias = "fisherz", alias = "fisher_z")]
    FisherZ,
    /// Stratified chi-square on equal-frequency discretised data.
    #[serde(rename = "chi_square", alias = "chi-square", alias = "chisq")]
    ChiSquare,
}

impl CiTestMethod {
    pub const ALL: [CiTestMethod; 3] = [Self::PearsonCorrelation, Self::FisherZ, Self::ChiSquare];

    /// Parse from any accepted spelling.
    pub fn from_str_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pearsonr" | "pearson" => Some(Self::PearsonCorrelation),
            "fisher-z" | "fisherz" | "fisher_z" => Some(Self::FisherZ),
            "chi_square" | "chi-square" | "chisq" => Some(Self::ChiSquare),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PearsonCorrelation => "pearsonr",
            Self::FisherZ => "fisher-z",
            Self::ChiSquare => "chi_square",
        }
    }
}

impl std::str::FromStr for CiTestMethod {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_name(s).ok_or_else(|| DiscoveryError::UnknownTest {
            name: s.to_string(),
        })
    }
}

impl std::fmt::Display for CiTestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
