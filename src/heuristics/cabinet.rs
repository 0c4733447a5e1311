//! Minister loyalty reactions

use super::{DecisionContext, PolicyKind};
use crate::core::random::RandomSource;
use crate::core::types::{Decision, MinisterKey, RoundResult};
use serde::{Deserialize, Serialize};

const MILITARIZATION_RUN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinisterDelta {
    pub minister: MinisterKey,
    pub delta: i32,
    pub reason: String,
}

/// Loyalty changes for a decision
///
/// A lost mini-game floors a positive change to half; losses stay whole.
pub fn cabinet_deltas(
    policy_id: &str,
    decision: Decision,
    result: RoundResult,
    ctx: &DecisionContext,
    rng: &mut dyn RandomSource,
) -> Vec<MinisterDelta> {
    let lost = result == RoundResult::Loss;
    let mut out = Vec::new();
    let mut add = |minister: MinisterKey, base: i32, reason: &str| {
        let delta = if lost && base > 0 { base.div_euclid(2) } else { base };
        out.push(MinisterDelta {
            minister,
            delta,
            reason: reason.to_string(),
        });
    };

    use MinisterKey::*;
    match (PolicyKind::from_id(policy_id), decision) {
        (Some(PolicyKind::Infrastructure), Decision::Approve) => {
            add(Finance, 3 + rng.below(4), "Infrastructure spending approved");
            add(Justice, 1 + rng.below(2), "Public welfare investment");
        }
        (Some(PolicyKind::Infrastructure), Decision::Reject) => {
            add(Finance, -4 - rng.below(3), "Infrastructure deal rejected");
            add(Justice, -1 - rng.below(2), "Missed public investment");
        }
        (Some(PolicyKind::Military), Decision::Approve) => {
            add(Defense, 4 + rng.below(4), "Defense budget increased");
            add(Foreign, 1 + rng.below(3), "Military strength signaled");
            if ctx.defense_approvals_in_row >= MILITARIZATION_RUN {
                add(Justice, -2 - rng.below(2), "Militarization concerns");
            }
        }
        (Some(PolicyKind::Military), Decision::Reject) => {
            add(Defense, -5 - rng.below(3), "Defense budget cut");
        }
        (Some(PolicyKind::Justice), Decision::Approve) => {
            add(Justice, 4 + rng.below(3), "Reform championed");
            add(Foreign, 1 + rng.below(2), "International praise for reform");
        }
        (Some(PolicyKind::Justice), Decision::Reject) => {
            add(Justice, -4 - rng.below(2), "Reform blocked");
        }
        (None, _) => {}
    }
    out
}
