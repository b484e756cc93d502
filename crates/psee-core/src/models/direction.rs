//! ANM decision labels and per-pair test results.

use serde::{Deserialize, Serialize};

/// Outcome of the pairwise direction test for an ordered pair (first, second).
///
/// "Forward" always means first slot → second slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionLabel {
    /// First causes second; only the forward model passes the threshold.
    Forward,
    /// Second causes first; only the backward model passes the threshold.
    Backward,
    /// Forward preferred by p-value, without a clean threshold split.
    WeakForward,
    /// Backward preferred by p-value, without a clean threshold split.
    WeakBackward,
    /// Equal p-values.
    Inconclusive,
}

impl DirectionLabel {
    pub const ALL: [DirectionLabel; 5] = [
        Self::Forward,
        Self::Backward,
        Self::WeakForward,
        Self::WeakBackward,
        Self::Inconclusive,
    ];

    /// Whether the label asks for the edge to be reversed.
    pub fn is_reverse(&self) -> bool {
        matches!(self, Self::Backward | Self::WeakBackward)
    }

    /// Whether the label supports the current orientation.
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward | Self::WeakForward)
    }

    /// Confident labels are the two threshold-split outcomes.
    pub fn is_confident(&self) -> bool {
        matches!(self, Self::Forward | Self::Backward)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "A --> B",
            Self::Backward => "B --> A",
            Self::WeakForward => "A --> B (Weak)",
            Self::WeakBackward => "B --> A (Weak)",
            Self::Inconclusive => "Inconclusive",
        }
    }
}

impl std::fmt::Display for DirectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one ANM test on an ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnmResult {
    pub label: DirectionLabel,
    /// Independence p-value of residuals vs regressor, first → second model.
    pub p_forward: f64,
    /// Independence p-value of residuals vs regressor, second → first model.
    pub p_backward: f64,
}
