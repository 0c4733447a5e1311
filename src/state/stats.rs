//! Headline stats and terminal detection
//!
//! Approval, power and standing stay within [0, 100]. Every mutation is an
//! additive delta clamped immediately, followed by a terminal check.

use crate::core::types::StatDelta;
use serde::{Deserialize, Serialize};

pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub approval: i32,
    pub power: i32,
    pub standing: i32,
}

impl Stats {
    pub fn new(approval: i32, power: i32, standing: i32) -> Self {
        Self {
            approval: approval.clamp(STAT_MIN, STAT_MAX),
            power: power.clamp(STAT_MIN, STAT_MAX),
            standing: standing.clamp(STAT_MIN, STAT_MAX),
        }
    }

    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value)
    }

    pub fn total(&self) -> i32 {
        self.approval + self.power + self.standing
    }

    pub fn average(&self) -> f64 {
        self.total() as f64 / 3.0
    }

    fn applied(&self, delta: &StatDelta) -> Self {
        Self::new(
            self.approval + delta.approval,
            self.power + delta.power,
            self.standing + delta.standing,
        )
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::uniform(50)
    }
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
}

/// Evaluate the terminal rule for a set of stats
///
/// Loss is checked first: a stat at zero loses even when the other two are
/// past the win threshold.
pub fn terminal_result(stats: &Stats, win_threshold: i32) -> Option<GameResult> {
    if stats.approval == STAT_MIN || stats.power == STAT_MIN || stats.standing == STAT_MIN {
        Some(GameResult::Loss)
    } else if stats.approval >= win_threshold
        && stats.power >= win_threshold
        && stats.standing >= win_threshold
    {
        Some(GameResult::Win)
    } else {
        None
    }
}

/// Stats plus the terminal flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatLedger {
    stats: Stats,
    result: Option<GameResult>,
    starting_value: i32,
    win_threshold: i32,
}

impl StatLedger {
    pub fn new(starting_value: i32, win_threshold: i32) -> Self {
        Self {
            stats: Stats::uniform(starting_value),
            result: None,
            starting_value,
            win_threshold,
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Apply a delta and re-evaluate the terminal rule
    ///
    /// Once a result is set the ledger is frozen; returns whether anything
    /// changed.
    pub fn apply(&mut self, delta: &StatDelta) -> bool {
        if self.result.is_some() {
            return false;
        }
        let before = self.stats;
        self.stats = self.stats.applied(delta);
        self.result = terminal_result(&self.stats, self.win_threshold);
        before != self.stats || self.result.is_some()
    }

    /// Restore starting stats and clear the result
    pub fn reset(&mut self) {
        self.stats = Stats::uniform(self.starting_value);
        self.result = None;
    }
}
