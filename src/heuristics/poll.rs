//! Exit poll movement

use super::PolicyKind;
use crate::core::random::RandomSource;
use crate::core::types::{AgeBracket, Decision, Difficulty, Gender, RoundResult};
use crate::state::poll::PollDelta;

const NOISE: f64 = 0.7;
const HARD_AMPLIFIER: f64 = 1.15;
const LOSS_SCALE: f64 = 0.6;
const DRIFT_NOISE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollContext<'a> {
    pub approval: i32,
    pub unemp: f64,
    pub infl: f64,
    pub policy_id: &'a str,
    pub decision: Decision,
    pub result: RoundResult,
    pub difficulty: Difficulty,
}

/// Shift in every demographic after a decision
pub fn poll_shift(ctx: &PollContext<'_>, rng: &mut dyn RandomSource) -> PollDelta {
    let hard = if ctx.difficulty == Difficulty::Hard { HARD_AMPLIFIER } else { 1.0 };
    let won = ctx.result == RoundResult::Win;
    let sign = if ctx.decision == Decision::Approve { 1.0 } else { -1.0 };
    let outcome_scale = if won { 1.0 } else { LOSS_SCALE };

    let mut scale = |n: f64| n * hard * outcome_scale + rng.jitter(NOISE);
    let mut out = PollDelta::default();

    use AgeBracket::*;
    match PolicyKind::from_id(ctx.policy_id) {
        Some(PolicyKind::Infrastructure) => {
            out.add_age(From18To30, scale(2.6) * sign);
            out.add_age(From31To60, scale(1.8) * sign);
            out.add_age(From60To80, scale(0.8) * sign);
            out.add_gender(Gender::Female, scale(1.2) * sign);
            out.urban = Some(scale(1.5) * sign);
            out.rural = Some(scale(0.8) * sign);
            out.undecided = Some(-scale(0.9).abs() * sign);
        }
        Some(PolicyKind::Military) => {
            out.add_age(From18To30, scale(-0.6) * sign);
            out.add_age(From31To60, scale(1.0) * sign);
            out.add_age(From60To80, scale(1.6) * sign);
            out.add_gender(Gender::Male, scale(1.3) * sign);
            out.add_gender(Gender::Female, scale(-0.4) * sign);
            out.urban = Some(scale(0.6) * sign);
            out.undecided = Some(-scale(0.5).abs() * sign);
        }
        Some(PolicyKind::Justice) => {
            out.add_gender(Gender::Female, scale(1.8) * sign);
            out.add_age(From18To30, scale(1.4) * sign);
            out.add_age(From31To60, scale(0.9) * sign);
            out.add_age(From60To80, scale(0.5) * sign);
            out.urban = Some(scale(0.9) * sign);
            out.undecided = Some(-scale(0.7).abs() * sign);
        }
        None => {}
    }

    // Economy cross-effects
    if ctx.unemp < 5.5 {
        out.add_age(From18To30, 0.6);
    }
    if ctx.infl > 8.0 {
        out.add_age(From60To80, -0.8);
    }

    let approval_lean = (ctx.approval - 50) as f64;
    let party_swing = if won { 0.8 } else { -0.8 };
    out.own_party = Some(approval_lean * 0.06 + party_swing + rng.jitter(NOISE));
    out.overall = Some(approval_lean * 0.04 + rng.jitter(NOISE));

    out
}

/// Slow background movement while the term runs
pub fn poll_time_drift(approval: i32, rng: &mut dyn RandomSource) -> PollDelta {
    PollDelta {
        undecided: Some(if approval >= 60 { -0.6 } else { 0.6 }),
        overall: Some((approval - 50) as f64 * 0.02 + rng.jitter(DRIFT_NOISE)),
        ..Default::default()
    }
}
