//! Per-bloc foreign opinion
//!
//! The stance is stored, not computed on read. Callers follow a two-step
//! protocol: `apply` the score delta, then `recompute_stance` for that bloc.
//! Until the second step runs the stored stance reflects the previous score.

use super::{push_capped, seeded_trend, TrendPoint};
use crate::core::types::{BlocKey, Seconds};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const SUPPORTIVE_AT: f64 = 67.0;
pub const NEUTRAL_AT: f64 = 34.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    Supportive,
    Neutral,
    Critical,
}

impl Stance {
    pub fn from_score(score: f64) -> Self {
        if score >= SUPPORTIVE_AT {
            Self::Supportive
        } else if score >= NEUTRAL_AT {
            Self::Neutral
        } else {
            Self::Critical
        }
    }
}

/// Score change for one bloc with an optional explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlocDelta {
    pub bloc: BlocKey,
    pub score: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignOpinion {
    pub score: f64,
    pub stance: Stance,
    pub reason: String,
    pub history: VecDeque<TrendPoint>,
}

impl ForeignOpinion {
    fn seed() -> Self {
        Self {
            score: 50.0,
            stance: Stance::Neutral,
            reason: String::new(),
            history: seeded_trend(50.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignRelations {
    blocs: [ForeignOpinion; 5],
    trend_cap: usize,
}

impl ForeignRelations {
    pub fn new(trend_cap: usize) -> Self {
        Self {
            blocs: std::array::from_fn(|_| ForeignOpinion::seed()),
            trend_cap,
        }
    }

    pub fn get(&self, bloc: BlocKey) -> &ForeignOpinion {
        &self.blocs[bloc.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlocKey, &ForeignOpinion)> {
        BlocKey::ALL.iter().map(move |&k| (k, &self.blocs[k.index()]))
    }

    /// Every bloc back to 50 / Neutral
    pub fn init(&mut self) {
        *self = Self::new(self.trend_cap);
    }

    /// First step: move the score and record a trend point
    ///
    /// The reason is only replaced when one is given.
    pub fn apply(&mut self, delta: &BlocDelta, t: Seconds) {
        let opinion = &mut self.blocs[delta.bloc.index()];
        opinion.score = (opinion.score + delta.score).clamp(0.0, 100.0);
        if let Some(reason) = &delta.reason {
            opinion.reason = reason.clone();
        }
        push_capped(
            &mut opinion.history,
            TrendPoint::new(t, opinion.score),
            self.trend_cap,
        );
    }

    /// Second step: bring the stored stance in line with the score
    pub fn recompute_stance(&mut self, bloc: BlocKey) -> Stance {
        let opinion = &mut self.blocs[bloc.index()];
        opinion.stance = Stance::from_score(opinion.score);
        opinion.stance
    }
}
