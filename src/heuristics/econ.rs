//! Economic consequences of a decision

use super::PolicyKind;
use crate::core::random::RandomSource;
use crate::core::types::{Decision, Difficulty, RoundResult};
use crate::state::economy::EconomyDelta;
use serde::{Deserialize, Serialize};

const NOISE: f64 = 0.1;
const LOSS_DAMPING: f64 = 0.5;
/// Net business score beyond which the mood leaves "Mixed"
const BUSINESS_BAND: f64 = 5.0;

fn base_effect(kind: PolicyKind, decision: Decision) -> EconomyDelta {
    use Decision::*;
    use PolicyKind::*;
    match (kind, decision) {
        (Infrastructure, Approve) => EconomyDelta { gdp: 2.0, infl: 0.2, unemp: -0.3, market: 1.5, conf: 4.0 },
        (Infrastructure, Reject) => EconomyDelta { gdp: -1.0, infl: 0.0, unemp: 0.0, market: -1.0, conf: -3.0 },
        (Military, Approve) => EconomyDelta { gdp: 1.2, infl: 0.3, unemp: 0.0, market: 0.8, conf: 1.0 },
        (Military, Reject) => EconomyDelta { gdp: 0.0, infl: 0.0, unemp: 0.0, market: -1.0, conf: -2.0 },
        (Justice, Approve) => EconomyDelta { gdp: 0.5, infl: 0.0, unemp: 0.0, market: 0.0, conf: 2.0 },
        (Justice, Reject) => EconomyDelta { gdp: 0.0, infl: 0.0, unemp: 0.0, market: 0.0, conf: -2.0 },
    }
}

fn difficulty_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Hard => 1.25,
        Difficulty::Medium => 1.0,
        Difficulty::Easy => 0.75,
    }
}

/// Halve only the beneficial direction of each field
///
/// Rising GDP, market and confidence are good; falling unemployment and
/// inflation are good. Adverse movement passes through unchanged.
fn dampen_loss(d: EconomyDelta) -> EconomyDelta {
    let up_is_good = |v: f64| if v > 0.0 { v * LOSS_DAMPING } else { v };
    let down_is_good = |v: f64| if v < 0.0 { v * LOSS_DAMPING } else { v };
    EconomyDelta {
        gdp: up_is_good(d.gdp),
        infl: down_is_good(d.infl),
        unemp: down_is_good(d.unemp),
        market: up_is_good(d.market),
        conf: up_is_good(d.conf),
    }
}

/// Expected impact before the mini-game is played: no result, no noise
pub fn predict_impact(policy_id: &str, difficulty: Difficulty, decision: Decision) -> EconomyDelta {
    match PolicyKind::from_id(policy_id) {
        Some(kind) => base_effect(kind, decision).scaled(difficulty_multiplier(difficulty)),
        None => EconomyDelta::default(),
    }
}

/// Impact actually applied after the mini-game resolves
pub fn realized_impact(
    policy_id: &str,
    difficulty: Difficulty,
    decision: Decision,
    result: RoundResult,
    rng: &mut dyn RandomSource,
) -> EconomyDelta {
    let mut adjusted = predict_impact(policy_id, difficulty, decision);
    if result == RoundResult::Loss {
        adjusted = dampen_loss(adjusted);
    }
    EconomyDelta {
        gdp: adjusted.gdp + rng.jitter(NOISE),
        infl: adjusted.infl + rng.jitter(NOISE),
        unemp: adjusted.unemp + rng.jitter(NOISE),
        market: adjusted.market + rng.jitter(NOISE),
        conf: adjusted.conf + rng.jitter(NOISE),
    }
}

/// How the business community reads a predicted impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessOpinion {
    Favorable,
    Mixed,
    Concern,
}

pub fn business_opinion(delta: &EconomyDelta) -> BusinessOpinion {
    let score = 2.0 * delta.gdp + 2.0 * delta.market + delta.conf - delta.infl - delta.unemp;
    if score > BUSINESS_BAND {
        BusinessOpinion::Favorable
    } else if score < -BUSINESS_BAND {
        BusinessOpinion::Concern
    } else {
        BusinessOpinion::Mixed
    }
}
