//! Legacy index and the best-ever record
//!
//! The index is a pure function of the final stats, GDP and unemployment.
//! Only the best index/title pair outlives a term.

use super::economy::{GDP_RANGE, UNEMP_RANGE};
use super::push_capped;
use super::stats::Stats;
use crate::core::types::Seconds;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const STAT_WEIGHT: f64 = 0.6;
const GDP_BONUS_MAX: f64 = 40.0;
const UNEMP_PENALTY_MAX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyTitle {
    #[serde(rename = "Visionary Leader")]
    VisionaryLeader,
    #[serde(rename = "Respected Statesman")]
    RespectedStatesman,
    #[serde(rename = "Pragmatic Politician")]
    PragmaticPolitician,
    #[serde(rename = "Disgraced Official")]
    DisgracedOfficial,
}

impl LegacyTitle {
    pub fn for_index(index: f64) -> Self {
        if index >= 85.0 {
            Self::VisionaryLeader
        } else if index >= 70.0 {
            Self::RespectedStatesman
        } else if index >= 50.0 {
            Self::PragmaticPolitician
        } else {
            Self::DisgracedOfficial
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VisionaryLeader => "Visionary Leader",
            Self::RespectedStatesman => "Respected Statesman",
            Self::PragmaticPolitician => "Pragmatic Politician",
            Self::DisgracedOfficial => "Disgraced Official",
        }
    }
}

/// Compute the legacy index, clamped to [0, 100]
pub fn legacy_index(stats: &Stats, gdp: f64, unemp: f64) -> f64 {
    let gdp_bonus = (gdp - GDP_RANGE.0) / (GDP_RANGE.1 - GDP_RANGE.0) * GDP_BONUS_MAX;
    let unemp_penalty =
        (unemp - UNEMP_RANGE.0) / (UNEMP_RANGE.1 - UNEMP_RANGE.0) * UNEMP_PENALTY_MAX;
    (stats.average() * STAT_WEIGHT + gdp_bonus - unemp_penalty).clamp(0.0, 100.0)
}

/// The persisted best-ever pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRecord {
    pub best_index: f64,
    pub best_title: Option<LegacyTitle>,
}

impl Default for LegacyRecord {
    fn default() -> Self {
        Self {
            best_index: 0.0,
            best_title: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyPoint {
    pub t: Seconds,
    pub index: f64,
}

/// Result of a term-end evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyEvaluation {
    pub index: f64,
    pub title: LegacyTitle,
    pub new_best: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyTracker {
    best: LegacyRecord,
    history: VecDeque<LegacyPoint>,
    trend_cap: usize,
}

impl LegacyTracker {
    pub fn new(best: LegacyRecord, trend_cap: usize) -> Self {
        Self {
            best,
            history: VecDeque::new(),
            trend_cap,
        }
    }

    pub fn best(&self) -> &LegacyRecord {
        &self.best
    }

    pub fn history(&self) -> &VecDeque<LegacyPoint> {
        &self.history
    }

    /// Record an index; the best pair only moves on a strictly greater value
    pub fn record(&mut self, index: f64, t: Seconds) -> LegacyEvaluation {
        let title = LegacyTitle::for_index(index);
        push_capped(&mut self.history, LegacyPoint { t, index }, self.trend_cap);
        let new_best = index > self.best.best_index;
        if new_best {
            self.best = LegacyRecord {
                best_index: index,
                best_title: Some(title),
            };
        }
        LegacyEvaluation { index, title, new_best }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_formula() {
        let index = legacy_index(&Stats::uniform(70), 100.0, 6.0);
        // 42 + 17.142857 - 4.444444
        assert!((index - 54.698413).abs() < 1e-5);
        assert_eq!(LegacyTitle::for_index(index), LegacyTitle::PragmaticPolitician);
    }

    #[test]
    fn test_respected_tier() {
        let index = legacy_index(&Stats::uniform(80), 130.0, 4.0);
        assert!((index - 80.063492).abs() < 1e-5);
        assert_eq!(LegacyTitle::for_index(index), LegacyTitle::RespectedStatesman);
    }

    #[test]
    fn test_index_is_clamped() {
        assert_eq!(legacy_index(&Stats::uniform(100), 140.0, 2.0), 100.0);
        assert_eq!(legacy_index(&Stats::uniform(0), 70.0, 20.0), 0.0);
    }

    #[test]
    fn test_title_thresholds() {
        assert_eq!(LegacyTitle::for_index(85.0), LegacyTitle::VisionaryLeader);
        assert_eq!(LegacyTitle::for_index(84.99), LegacyTitle::RespectedStatesman);
        assert_eq!(LegacyTitle::for_index(70.0), LegacyTitle::RespectedStatesman);
        assert_eq!(LegacyTitle::for_index(50.0), LegacyTitle::PragmaticPolitician);
        assert_eq!(LegacyTitle::for_index(49.99), LegacyTitle::DisgracedOfficial);
    }

    #[test]
    fn test_best_only_moves_up_strictly() {
        let mut tracker = LegacyTracker::new(LegacyRecord::default(), 40);
        assert!(tracker.record(60.0, 120).new_best);
        assert!(!tracker.record(60.0, 120).new_best);
        assert!(!tracker.record(40.0, 120).new_best);
        assert_eq!(tracker.best().best_index, 60.0);
        assert_eq!(tracker.best().best_title, Some(LegacyTitle::PragmaticPolitician));
        assert_eq!(tracker.history().len(), 3);
    }
}
