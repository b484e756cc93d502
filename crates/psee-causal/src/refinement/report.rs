use serde::{Deserialize, Serialize};

use psee_core::AnmResult;

/// What refinement did with one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeAction {
    Kept,
    Reversed,
}

/// Decision for one snapshot edge `source → target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDecision {
    pub source: String,
    pub target: String,
    pub result: AnmResult,
    pub action: EdgeAction,
    /// The reversal closed a directed cycle.
    pub created_cycle: bool,
}

/// Every decision of one refinement pass, in snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefinementReport {
    pub decisions: Vec<EdgeDecision>,
}

impl RefinementReport {
    pub fn reversed_count(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| d.action == EdgeAction::Reversed)
            .count()
    }

    pub fn confirmed_count(&self) -> usize {
        self.decisions.len() - self.reversed_count()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
