//! Demographic exit poll
//!
//! Each bucket is an independent approval percentage, not a share of a
//! partition, so nothing forces the buckets to sum to 100.

use super::{push_capped, seeded_trend, TrendPoint};
use crate::core::random::RandomSource;
use crate::core::types::{AgeBracket, Gender, Seconds};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const SAMPLE_SIZE: u32 = 5000;
pub const BASE_MOE: f64 = 2.3;
pub const MOE_SPREAD: f64 = 0.4;

const AGE_SEED: [f64; 4] = [48.0, 52.0, 54.0, 51.0];
const GENDER_SEED: [f64; 3] = [50.0, 51.0, 49.0];
const OWN_PARTY_SEED: f64 = 55.0;
const URBAN_SEED: f64 = 49.0;
const RURAL_SEED: f64 = 53.0;
const UNDECIDED_SEED: f64 = 18.0;
const OVERALL_SEED: f64 = 50.0;

/// Shift to apply to the poll; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollDelta {
    pub age: [Option<f64>; 4],
    pub gender: [Option<f64>; 3],
    pub own_party: Option<f64>,
    pub urban: Option<f64>,
    pub rural: Option<f64>,
    pub undecided: Option<f64>,
    /// Offset from the mean age approval for the next overall point
    pub overall: Option<f64>,
}

impl PollDelta {
    pub fn add_age(&mut self, bracket: AgeBracket, delta: f64) {
        let slot = &mut self.age[bracket.index()];
        *slot = Some(slot.unwrap_or(0.0) + delta);
    }

    pub fn add_gender(&mut self, gender: Gender, delta: f64) {
        let slot = &mut self.gender[gender.index()];
        *slot = Some(slot.unwrap_or(0.0) + delta);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollTrends {
    pub age: [VecDeque<TrendPoint>; 4],
    pub gender: [VecDeque<TrendPoint>; 3],
    pub own_party: VecDeque<TrendPoint>,
    pub urban: VecDeque<TrendPoint>,
    pub rural: VecDeque<TrendPoint>,
    pub undecided: VecDeque<TrendPoint>,
    pub overall: VecDeque<TrendPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitPoll {
    pub sample: u32,
    pub moe: f64,
    pub age: [f64; 4],
    pub gender: [f64; 3],
    pub own_party: f64,
    pub urban: f64,
    pub rural: f64,
    pub undecided: f64,
    pub trends: PollTrends,
    /// Elapsed term second of the latest update
    pub last_updated: Seconds,
    trend_cap: usize,
}

impl ExitPoll {
    pub fn new(trend_cap: usize) -> Self {
        Self {
            sample: SAMPLE_SIZE,
            moe: BASE_MOE,
            age: AGE_SEED,
            gender: GENDER_SEED,
            own_party: OWN_PARTY_SEED,
            urban: URBAN_SEED,
            rural: RURAL_SEED,
            undecided: UNDECIDED_SEED,
            trends: PollTrends {
                age: AGE_SEED.map(seeded_trend),
                gender: GENDER_SEED.map(seeded_trend),
                own_party: seeded_trend(OWN_PARTY_SEED),
                urban: seeded_trend(URBAN_SEED),
                rural: seeded_trend(RURAL_SEED),
                undecided: seeded_trend(UNDECIDED_SEED),
                overall: seeded_trend(OVERALL_SEED),
            },
            last_updated: 0,
            trend_cap,
        }
    }

    pub fn init(&mut self) {
        *self = Self::new(self.trend_cap);
    }

    pub fn age(&self, bracket: AgeBracket) -> f64 {
        self.age[bracket.index()]
    }

    pub fn gender(&self, gender: Gender) -> f64 {
        self.gender[gender.index()]
    }

    pub fn mean_age_approval(&self) -> f64 {
        self.age.iter().sum::<f64>() / self.age.len() as f64
    }

    /// Latest point on the overall trend
    pub fn overall(&self) -> f64 {
        self.trends
            .overall
            .back()
            .map(|p| p.value)
            .unwrap_or(OVERALL_SEED)
    }

    /// Apply a shift at elapsed time `t` and re-draw the margin of error
    pub fn apply(&mut self, delta: &PollDelta, t: Seconds, rng: &mut dyn RandomSource) {
        let cap = self.trend_cap;

        for (i, d) in delta.age.iter().enumerate() {
            if let Some(d) = d {
                bump(&mut self.age[i], &mut self.trends.age[i], *d, t, cap);
            }
        }
        for (i, d) in delta.gender.iter().enumerate() {
            if let Some(d) = d {
                bump(&mut self.gender[i], &mut self.trends.gender[i], *d, t, cap);
            }
        }
        if let Some(d) = delta.own_party {
            bump(&mut self.own_party, &mut self.trends.own_party, d, t, cap);
        }
        if let Some(d) = delta.urban {
            bump(&mut self.urban, &mut self.trends.urban, d, t, cap);
        }
        if let Some(d) = delta.rural {
            bump(&mut self.rural, &mut self.trends.rural, d, t, cap);
        }
        if let Some(d) = delta.undecided {
            bump(&mut self.undecided, &mut self.trends.undecided, d, t, cap);
        }
        if let Some(d) = delta.overall {
            let overall = (self.mean_age_approval() + d).clamp(0.0, 100.0);
            push_capped(&mut self.trends.overall, TrendPoint::new(t, overall), cap);
        }

        self.moe = BASE_MOE + rng.jitter(MOE_SPREAD);
        self.last_updated = t;
    }
}

fn bump(value: &mut f64, trend: &mut VecDeque<TrendPoint>, delta: f64, t: Seconds, cap: usize) {
    *value = (*value + delta).clamp(0.0, 100.0);
    push_capped(trend, TrendPoint::new(t, *value), cap);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SequenceRandom;

    #[test]
    fn test_seed_values() {
        let poll = ExitPoll::new(40);
        assert_eq!(poll.age(AgeBracket::From60To80), 54.0);
        assert_eq!(poll.gender(Gender::Female), 51.0);
        assert_eq!(poll.own_party, 55.0);
        assert_eq!(poll.undecided, 18.0);
        assert_eq!(poll.overall(), 50.0);
        assert_eq!(poll.sample, 5000);
        assert_eq!(poll.moe, 2.3);
    }

    #[test]
    fn test_apply_touches_only_given_fields() {
        let mut poll = ExitPoll::new(40);
        let mut rng = SequenceRandom::constant(0.5);
        let mut delta = PollDelta::default();
        delta.add_age(AgeBracket::From18To30, 2.0);
        delta.urban = Some(1.5);
        poll.apply(&delta, 7, &mut rng);

        assert_eq!(poll.age(AgeBracket::From18To30), 50.0);
        assert_eq!(poll.age(AgeBracket::From31To60), 52.0);
        assert_eq!(poll.urban, 50.5);
        assert_eq!(poll.rural, 53.0);
        assert_eq!(poll.trends.age[0].len(), 2);
        assert_eq!(poll.trends.age[1].len(), 1);
        assert_eq!(poll.trends.urban.len(), 2);
        assert_eq!(poll.trends.overall.len(), 1);
        assert_eq!(poll.last_updated, 7);
    }

    #[test]
    fn test_overall_follows_mean_age() {
        let mut poll = ExitPoll::new(40);
        let mut rng = SequenceRandom::constant(0.5);
        let delta = PollDelta { overall: Some(1.0), ..Default::default() };
        poll.apply(&delta, 1, &mut rng);
        assert!((poll.overall() - 52.25).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_and_moe_jittered() {
        let mut poll = ExitPoll::new(40);
        let mut rng = SequenceRandom::constant(1.0);
        let delta = PollDelta {
            undecided: Some(-500.0),
            own_party: Some(500.0),
            ..Default::default()
        };
        poll.apply(&delta, 1, &mut rng);
        assert_eq!(poll.undecided, 0.0);
        assert_eq!(poll.own_party, 100.0);
        assert!(poll.moe > 2.6 && poll.moe <= 2.7);
    }

    #[test]
    fn test_trends_are_capped() {
        let mut poll = ExitPoll::new(40);
        let mut rng = SequenceRandom::constant(0.5);
        let delta = PollDelta { rural: Some(0.1), ..Default::default() };
        for t in 0..100 {
            poll.apply(&delta, t, &mut rng);
        }
        assert_eq!(poll.trends.rural.len(), 40);
    }
}
