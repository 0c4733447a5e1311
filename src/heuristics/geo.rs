//! Foreign bloc reactions to a decision

use super::{DecisionContext, PolicyKind};
use crate::core::random::RandomSource;
use crate::core::types::{BlocKey, Decision, Difficulty, RoundResult};
use crate::state::foreign::BlocDelta;

const NOISE: f64 = 1.0;
const LOSS_DAMPING: f64 = 0.5;
const MILITARIZATION_RUN: usize = 2;
const INSTABILITY_LOSSES: usize = 2;

fn difficulty_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Hard => 1.25,
        Difficulty::Medium => 1.0,
        Difficulty::Easy => 0.85,
    }
}

struct Impacts<'a> {
    out: Vec<BlocDelta>,
    rng: &'a mut dyn RandomSource,
    multiplier: f64,
    lost: bool,
}

impl Impacts<'_> {
    /// `base + U[0, spread)`
    fn draw(&mut self, base: f64, spread: f64) -> f64 {
        base + self.rng.next_f64() * spread
    }

    /// Favourable reaction: scaled by difficulty, halved on a loss
    fn welcome(&mut self, bloc: BlocKey, base: f64, spread: f64, reason: &str) {
        let mut delta = self.draw(base, spread) * self.multiplier;
        if self.lost {
            delta *= LOSS_DAMPING;
        }
        self.push(bloc, delta, reason);
    }

    /// Positive but indifferent to difficulty
    fn shrug(&mut self, bloc: BlocKey, base: f64, spread: f64, reason: &str) {
        let mut delta = self.draw(base, spread);
        if self.lost {
            delta *= LOSS_DAMPING;
        }
        self.push(bloc, delta, reason);
    }

    /// Adverse reaction: never scaled or dampened
    fn object(&mut self, bloc: BlocKey, base: f64, spread: f64, reason: &str) {
        let delta = -self.draw(base, spread);
        self.push(bloc, delta, reason);
    }

    fn push(&mut self, bloc: BlocKey, delta: f64, reason: &str) {
        let score = delta + self.rng.jitter(NOISE);
        self.out.push(BlocDelta {
            bloc,
            score,
            reason: Some(reason.to_string()),
        });
    }
}

/// Per-bloc score changes for a decision; blocs with no opinion are omitted
pub fn realized_geo_impact(
    policy_id: &str,
    decision: Decision,
    result: RoundResult,
    ctx: &DecisionContext,
    rng: &mut dyn RandomSource,
) -> Vec<BlocDelta> {
    let kind = PolicyKind::from_id(policy_id);
    let approve = decision == Decision::Approve;
    let mut im = Impacts {
        out: Vec::new(),
        rng,
        multiplier: difficulty_multiplier(ctx.difficulty),
        lost: result == RoundResult::Loss,
    };

    use BlocKey::*;
    use PolicyKind::*;

    // NATO: defense hawk, wary of justice reform
    match kind {
        Some(Military) if approve => im.welcome(Nato, 4.0, 3.0, "Welcomes stronger defense posture."),
        Some(Military) => im.object(Nato, 4.0, 2.0, "Concerned about defense budget cuts."),
        Some(Infrastructure) => im.shrug(Nato, 1.0, 1.0, "Neutral on infrastructure spending."),
        Some(Justice) => im.object(Nato, 1.0, 2.0, "Wary of justice reforms."),
        None => {}
    }

    // EU: infrastructure and reform, cautious on escalation
    match kind {
        Some(Infrastructure) if approve => im.welcome(Eu, 4.0, 2.0, "Applauds infrastructure investment."),
        Some(Infrastructure) => im.object(Eu, 3.0, 2.0, "Disappointed by infrastructure rejection."),
        Some(Justice) if approve => im.welcome(Eu, 3.0, 2.0, "Applauds social justice reforms."),
        Some(Justice) => im.object(Eu, 3.0, 2.0, "Regrets rejection of justice reforms."),
        Some(Military) if approve => im.object(Eu, 1.0, 2.0, "Cautious about military escalation."),
        _ => {}
    }

    // BRICS: sovereignty and big build-outs
    match kind {
        Some(Military) if approve => im.welcome(Brics, 3.0, 3.0, "Backs defense sovereignty."),
        Some(Infrastructure) if approve => im.welcome(Brics, 3.0, 3.0, "Backs major infrastructure build-out."),
        Some(Infrastructure) => im.object(Brics, 3.0, 2.0, "Disappointed by infrastructure rejection."),
        _ => {}
    }

    // OIC: social reform, uneasy with repeated defense approvals
    match kind {
        Some(Justice) if approve => im.welcome(Oic, 4.0, 2.0, "Supports social justice initiatives."),
        Some(Justice) => {}
        _ if ctx.defense_approvals_in_row >= MILITARIZATION_RUN => {
            im.object(Oic, 3.0, 2.0, "Concerns over escalating militarization.")
        }
        _ => {}
    }

    // SCO: stability-minded
    match kind {
        Some(Military) if approve => im.welcome(Sco, 3.0, 2.0, "Appreciates defense commitment."),
        Some(Infrastructure) if approve => im.welcome(Sco, 2.0, 2.0, "Supports infrastructure development."),
        _ => {}
    }
    if ctx.consecutive_losses >= INSTABILITY_LOSSES {
        im.object(Sco, 3.0, 3.0, "Uneasy with recent instability.");
    }

    im.out
}
