//! Cabinet loyalty and the resignation cycle
//!
//! `Active --(loyalty < threshold)--> Resigned --(shuffle)--> Active`.
//! Resignations wait in a FIFO queue until acknowledged by a shuffle.

use crate::core::random::RandomSource;
use crate::core::types::MinisterKey;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::push_capped;

pub const SEED_LOYALTY: i32 = 60;
pub const APPOINTEE_LOYALTY_MIN: i32 = 58;
pub const APPOINTEE_LOYALTY_SPAN: i32 = 8;
pub const APPOINTEE_REASON: &str = "New appointee";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinisterStatus {
    Active,
    Resigned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minister {
    pub name: String,
    pub loyalty: i32,
    pub trend: VecDeque<i32>,
    pub status: MinisterStatus,
    pub last_reason: Option<String>,
}

impl Minister {
    fn seed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            loyalty: SEED_LOYALTY,
            trend: VecDeque::from([SEED_LOYALTY]),
            status: MinisterStatus::Active,
            last_reason: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MinisterStatus::Active
    }
}

/// A resignation awaiting acknowledgment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resignation {
    pub minister: MinisterKey,
    pub name: String,
}

fn seed_name(key: MinisterKey) -> &'static str {
    match key {
        MinisterKey::Defense => "Sec. R. Hayes",
        MinisterKey::Finance => "Min. V. Patel",
        MinisterKey::Justice => "AG L. Romero",
        MinisterKey::Foreign => "FM A. Chen",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cabinet {
    ministers: [Minister; 4],
    pending: VecDeque<Resignation>,
    resignation_threshold: i32,
    trend_cap: usize,
}

impl Cabinet {
    pub fn new(resignation_threshold: i32, trend_cap: usize) -> Self {
        Self {
            ministers: MinisterKey::ALL.map(|k| Minister::seed(seed_name(k))),
            pending: VecDeque::new(),
            resignation_threshold,
            trend_cap,
        }
    }

    pub fn init(&mut self) {
        *self = Self::new(self.resignation_threshold, self.trend_cap);
    }

    pub fn get(&self, key: MinisterKey) -> &Minister {
        &self.ministers[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MinisterKey, &Minister)> {
        MinisterKey::ALL.iter().map(move |&k| (k, &self.ministers[k.index()]))
    }

    /// Resignations not yet acknowledged, oldest first
    pub fn pending(&self) -> &VecDeque<Resignation> {
        &self.pending
    }

    pub fn has_pending_shuffle(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Move a minister's loyalty; ignored while the minister is resigned
    ///
    /// Returns whether the loyalty was applied.
    pub fn bump_loyalty(&mut self, key: MinisterKey, delta: i32, reason: Option<&str>) -> bool {
        let cap = self.trend_cap;
        let minister = &mut self.ministers[key.index()];
        if !minister.is_active() {
            return false;
        }
        minister.loyalty = (minister.loyalty + delta).clamp(0, 100);
        push_capped(&mut minister.trend, minister.loyalty, cap);
        if let Some(reason) = reason {
            minister.last_reason = Some(reason.to_string());
        }
        true
    }

    /// Resign an active minister whose loyalty fell below the threshold
    pub fn maybe_resign(&mut self, key: MinisterKey) -> Option<Resignation> {
        let threshold = self.resignation_threshold;
        let minister = &mut self.ministers[key.index()];
        if minister.is_active() && minister.loyalty < threshold {
            minister.status = MinisterStatus::Resigned;
            let resignation = Resignation {
                minister: key,
                name: minister.name.clone(),
            };
            self.pending.push_back(resignation.clone());
            return Some(resignation);
        }
        None
    }

    /// Acknowledge the oldest resignation by appointing a replacement
    ///
    /// The new appointee starts with loyalty in [58, 66).
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) -> Option<MinisterKey> {
        let resignation = self.pending.pop_front()?;
        let cap = self.trend_cap;
        let minister = &mut self.ministers[resignation.minister.index()];
        let loyalty = APPOINTEE_LOYALTY_MIN + rng.below(APPOINTEE_LOYALTY_SPAN);
        minister.loyalty = loyalty;
        push_capped(&mut minister.trend, loyalty, cap);
        minister.status = MinisterStatus::Active;
        minister.last_reason = Some(APPOINTEE_REASON.to_string());
        Some(resignation.minister)
    }
}
