//! Benchmark ground-truth labels.

use serde::{Deserialize, Serialize};

/// Expected causal direction for a two-variable benchmark dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpectedDirection {
    #[serde(rename = "A --> B")]
    Forward,
    #[serde(rename = "B --> A")]
    Backward,
    #[serde(rename = "Ind/Confounder")]
    IndependentOrConfounded,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ExpectedDirection {
    /// Parse a ground-truth label; unrecognised labels map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "A --> B" | "A->B" | "A -> B" => Self::Forward,
            "B --> A" | "B->A" | "B -> A" => Self::Backward,
            "Ind/Confounder" => Self::IndependentOrConfounded,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "A --> B",
            Self::Backward => "B --> A",
            Self::IndependentOrConfounded => "Ind/Confounder",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ExpectedDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
