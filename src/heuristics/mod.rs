//! Pure delta functions
//!
//! Every heuristic takes its inputs explicitly, including the streak counts
//! derived from the policy log, and draws noise only through the supplied
//! `RandomSource`. None of them keeps state between calls.

pub mod cabinet;
pub mod econ;
pub mod geo;
pub mod poll;
pub mod remarks;

pub use cabinet::{cabinet_deltas, MinisterDelta};
pub use econ::{business_opinion, predict_impact, realized_impact, BusinessOpinion};
pub use geo::realized_geo_impact;
pub use poll::{poll_shift, poll_time_drift, PollContext};
pub use remarks::pick_remark;

use crate::core::types::{Decision, Difficulty, RoundResult};
use crate::state::log::PolicyLog;
use serde::{Deserialize, Serialize};

/// Trailing log entries inspected for the instability penalty
pub const LOSS_STREAK_WINDOW: usize = 2;

/// Policies the heuristics react to
///
/// Any other policy id produces no economic, foreign, cabinet or poll effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Infrastructure,
    Military,
    Justice,
}

impl PolicyKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "infrastructure" => Some(Self::Infrastructure),
            "military" => Some(Self::Military),
            "justice" => Some(Self::Justice),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Infrastructure => "infrastructure",
            Self::Military => "military",
            Self::Justice => "justice",
        }
    }
}

/// Streak information the caller derives from the policy log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub difficulty: Difficulty,
    /// Losses among the last `LOSS_STREAK_WINDOW` entries before this decision
    pub consecutive_losses: usize,
    /// Military approvals in the current unbroken run of military policies,
    /// counting this decision
    pub defense_approvals_in_row: usize,
}

impl DecisionContext {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            consecutive_losses: 0,
            defense_approvals_in_row: 0,
        }
    }

    /// Derive the context for a decision that is about to be logged
    ///
    /// A rejected military policy neither extends nor breaks the approval
    /// run; any other policy breaks it.
    pub fn from_log(log: &PolicyLog, policy_id: &str, decision: Decision, difficulty: Difficulty) -> Self {
        let consecutive_losses = log
            .recent(LOSS_STREAK_WINDOW)
            .iter()
            .filter(|e| e.result == RoundResult::Loss)
            .count();

        let military = PolicyKind::Military.id();
        let defense_approvals_in_row = if policy_id == military {
            let prior = log
                .entries()
                .iter()
                .rev()
                .take_while(|e| e.id == military)
                .filter(|e| e.decision == Decision::Approve)
                .count();
            prior + usize::from(decision == Decision::Approve)
        } else {
            0
        };

        Self {
            difficulty,
            consecutive_losses,
            defense_approvals_in_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StatDelta;
    use crate::state::log::PolicyLogEntry;

    fn push(log: &mut PolicyLog, id: &str, decision: Decision, result: RoundResult) {
        log.push(PolicyLogEntry {
            id: id.into(),
            title: id.into(),
            decision,
            result,
            delta: StatDelta::zero(),
            time: 0,
        });
    }

    #[test]
    fn test_policy_kind_ids() {
        assert_eq!(PolicyKind::from_id("military"), Some(PolicyKind::Military));
        assert_eq!(PolicyKind::from_id("fuel_tax"), None);
        assert_eq!(PolicyKind::Justice.id(), "justice");
    }

    #[test]
    fn test_defense_run_counts_current_decision() {
        let mut log = PolicyLog::new();
        let ctx = DecisionContext::from_log(&log, "military", Decision::Approve, Difficulty::Hard);
        assert_eq!(ctx.defense_approvals_in_row, 1);

        push(&mut log, "military", Decision::Approve, RoundResult::Win);
        let ctx = DecisionContext::from_log(&log, "military", Decision::Approve, Difficulty::Hard);
        assert_eq!(ctx.defense_approvals_in_row, 2);
    }

    #[test]
    fn test_military_reject_does_not_break_run() {
        let mut log = PolicyLog::new();
        push(&mut log, "military", Decision::Approve, RoundResult::Win);
        push(&mut log, "military", Decision::Reject, RoundResult::Loss);
        let ctx = DecisionContext::from_log(&log, "military", Decision::Approve, Difficulty::Medium);
        assert_eq!(ctx.defense_approvals_in_row, 2);
    }

    #[test]
    fn test_other_policy_breaks_run() {
        let mut log = PolicyLog::new();
        push(&mut log, "military", Decision::Approve, RoundResult::Win);
        push(&mut log, "justice", Decision::Approve, RoundResult::Win);
        let ctx = DecisionContext::from_log(&log, "military", Decision::Approve, Difficulty::Medium);
        assert_eq!(ctx.defense_approvals_in_row, 1);

        let ctx = DecisionContext::from_log(&log, "infrastructure", Decision::Approve, Difficulty::Medium);
        assert_eq!(ctx.defense_approvals_in_row, 0);
    }

    #[test]
    fn test_consecutive_losses_uses_prior_window() {
        let mut log = PolicyLog::new();
        push(&mut log, "a", Decision::Reject, RoundResult::Loss);
        push(&mut log, "b", Decision::Reject, RoundResult::Loss);
        push(&mut log, "c", Decision::Reject, RoundResult::Loss);
        let ctx = DecisionContext::from_log(&log, "justice", Decision::Approve, Difficulty::Easy);
        assert_eq!(ctx.consecutive_losses, 2);

        push(&mut log, "d", Decision::Approve, RoundResult::Win);
        let ctx = DecisionContext::from_log(&log, "justice", Decision::Approve, Difficulty::Easy);
        assert_eq!(ctx.consecutive_losses, 1);
    }
}
