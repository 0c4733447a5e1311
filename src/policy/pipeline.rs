//! Policy resolution
//!
//! Resolution is split in two so the advisor can be awaited between the
//! phases without holding the store:
//!
//! 1. `begin_resolution` validates the mini-game outcome, looks up the stat
//!    delta and captures the term epoch.
//! 2. `commit_resolution` re-checks the term and epoch, then applies every
//!    track in a fixed order: stats, economy, foreign blocs, cabinet, exit
//!    poll, log, world event, secretary remark, deck.
//!
//! A pending resolution whose term has ended or been reset is dropped.

use crate::core::error::{PoliticsError, Result};
use crate::core::types::{Decision, Difficulty, MiniGameOutcome, RoundResult, StatDelta};
use crate::heuristics::{
    business_opinion, cabinet_deltas, pick_remark, poll_shift, predict_impact, realized_geo_impact,
    realized_impact, BusinessOpinion, DecisionContext, MinisterDelta, PollContext,
};
use crate::llm::advisor::{fallback_comment, Advisor, CommentRequest};
use crate::rules::world_events::generate_world_event;
use crate::state::cabinet::Resignation;
use crate::state::economy::EconomyDelta;
use crate::state::events::WorldEvent;
use crate::state::foreign::BlocDelta;
use crate::state::log::PolicyLogEntry;
use crate::state::poll::PollDelta;
use crate::state::secretary::SecretaryRemark;
use crate::state::stats::GameResult;
use crate::state::store::GameStore;
use serde::{Deserialize, Serialize};

/// A resolution whose stat delta is known but not yet applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingResolution {
    pub policy_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub outcome: MiniGameOutcome,
    pub stat_delta: StatDelta,
    epoch: u64,
}

impl PendingResolution {
    /// Term epoch the resolution was started under
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn decision(&self) -> Decision {
        self.outcome.decision()
    }

    pub fn result(&self) -> RoundResult {
        self.outcome.result()
    }

    pub fn comment_request(&self) -> CommentRequest {
        CommentRequest::new(&self.policy_id, self.difficulty, &self.outcome)
    }
}

/// Everything one committed resolution changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub policy_id: String,
    pub title: String,
    pub decision: Decision,
    pub result: RoundResult,
    pub stat_delta: StatDelta,
    pub economy: EconomyDelta,
    pub foreign: Vec<BlocDelta>,
    pub cabinet: Vec<MinisterDelta>,
    pub resignations: Vec<Resignation>,
    pub poll: PollDelta,
    pub world_event: Option<WorldEvent>,
    pub remark: SecretaryRemark,
    pub advisor_comment: String,
    pub next_card: Option<String>,
    pub game_result: Option<GameResult>,
}

impl GameStore {
    /// Economic preview for a card before it is played
    pub fn preview_economy(
        &self,
        policy_id: &str,
        difficulty: Difficulty,
        decision: Decision,
    ) -> (EconomyDelta, BusinessOpinion) {
        let predicted = predict_impact(policy_id, difficulty, decision);
        (predicted, business_opinion(&predicted))
    }

    /// First phase: validate and capture
    ///
    /// Returns `Ok(None)` once the term is over. An idle term is started.
    pub fn begin_resolution(
        &mut self,
        policy_id: &str,
        difficulty: Difficulty,
        outcome: MiniGameOutcome,
    ) -> Result<Option<PendingResolution>> {
        if outcome.rounds == 0 {
            return Err(PoliticsError::InvalidOutcome(format!(
                "{} resolved with zero rounds",
                policy_id
            )));
        }
        if self.term.is_over() {
            tracing::debug!(policy = policy_id, "Resolution ignored, term is over");
            return Ok(None);
        }
        if !self.term.is_running() {
            self.start_term();
        }

        let stat_delta = self.effects.lookup(policy_id, difficulty, outcome.approved);
        let title = self
            .catalog
            .get(policy_id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| policy_id.to_string());

        Ok(Some(PendingResolution {
            policy_id: policy_id.to_string(),
            title,
            difficulty,
            outcome,
            stat_delta,
            epoch: self.term.epoch(),
        }))
    }

    /// Second phase: apply every track, or drop a stale resolution
    ///
    /// `advice` is the advisor's comment; a fallback line is used when absent.
    pub fn commit_resolution(
        &mut self,
        pending: PendingResolution,
        advice: Option<String>,
    ) -> Option<ResolutionReport> {
        if self.term.is_over() || pending.epoch != self.term.epoch() {
            tracing::debug!(
                policy = %pending.policy_id,
                pending_epoch = pending.epoch,
                epoch = self.term.epoch(),
                "Dropping stale resolution"
            );
            return None;
        }

        let PendingResolution {
            policy_id,
            title,
            difficulty,
            outcome,
            stat_delta,
            ..
        } = pending;
        let id = policy_id.as_str();
        let decision = outcome.decision();
        let result = outcome.result();
        let ctx = DecisionContext::from_log(&self.log, id, decision, difficulty);

        // Stats; a terminal result ends the term once the commit is complete
        self.apply_stats(&stat_delta);

        // Economy
        let economy = realized_impact(id, difficulty, decision, result, self.rng.as_mut());
        self.apply_economy_delta(&economy);

        // Foreign blocs: apply, then recompute the stance
        let foreign = realized_geo_impact(id, decision, result, &ctx, self.rng.as_mut());
        for delta in &foreign {
            self.apply_foreign_delta(delta);
            self.recompute_bloc_stance(delta.bloc);
        }

        // Cabinet
        let cabinet = cabinet_deltas(id, decision, result, &ctx, self.rng.as_mut());
        let mut resignations = Vec::new();
        for delta in &cabinet {
            self.bump_loyalty(delta.minister, delta.delta, Some(&delta.reason));
            if let Some(resignation) = self.maybe_resign(delta.minister) {
                resignations.push(resignation);
            }
        }

        // Exit poll
        let poll_ctx = PollContext {
            approval: self.ledger.stats().approval,
            unemp: self.economy.unemp(),
            infl: self.economy.infl(),
            policy_id: id,
            decision,
            result,
            difficulty,
        };
        let poll = poll_shift(&poll_ctx, self.rng.as_mut());
        self.apply_poll_delta(&poll);

        // Log
        let time = self.elapsed();
        self.add_policy_log(PolicyLogEntry {
            id: policy_id.clone(),
            title: title.clone(),
            decision,
            result,
            delta: stat_delta,
            time,
        });

        // World event
        let stats = self.ledger.stats();
        let draft = generate_world_event(
            &stats,
            &self.log,
            |h| self.events.is_headline_used(h),
            self.rng.as_mut(),
        );
        let world_event = draft.map(|d| self.add_world_event(d.headline, d.detail, d.urgency));

        // Secretary remark
        let (line, tone) = pick_remark(stat_delta.total(), self.rng.as_mut());
        let remark = SecretaryRemark {
            id: self.push_remark(line, tone),
            text: line.to_string(),
            tone,
            time,
        };

        let advisor_comment =
            advice.unwrap_or_else(|| fallback_comment(self.rng.as_mut()).to_string());

        let next_card = self
            .deck
            .resolve(&self.catalog, id, decision, self.rng.as_mut());

        tracing::debug!(
            policy = id,
            ?decision,
            delta = ?stat_delta,
            stats = ?stats,
            blocs = foreign.len(),
            ministers = cabinet.len(),
            event = world_event.is_some(),
            "Resolution committed"
        );

        self.end_on_result();

        Some(ResolutionReport {
            policy_id,
            title,
            decision,
            result,
            stat_delta,
            economy,
            foreign,
            cabinet,
            resignations,
            poll,
            world_event,
            remark,
            advisor_comment,
            next_card,
            game_result: self.ledger.result(),
        })
    }

    /// Resolve without an advisor; the comment is a fallback line
    pub fn resolve_policy(
        &mut self,
        policy_id: &str,
        difficulty: Difficulty,
        outcome: MiniGameOutcome,
    ) -> Result<Option<ResolutionReport>> {
        Ok(self
            .begin_resolution(policy_id, difficulty, outcome)?
            .and_then(|pending| self.commit_resolution(pending, None)))
    }

    /// Resolve and ask `advisor` for the comment between the two phases
    pub async fn resolve_with_advisor(
        &mut self,
        advisor: &Advisor,
        policy_id: &str,
        difficulty: Difficulty,
        outcome: MiniGameOutcome,
    ) -> Result<Option<ResolutionReport>> {
        let Some(pending) = self.begin_resolution(policy_id, difficulty, outcome)? else {
            return Ok(None);
        };
        let advice = advisor.comment(&pending.comment_request()).await;
        Ok(self.commit_resolution(pending, advice))
    }
}
