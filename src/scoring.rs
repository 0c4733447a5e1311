//! End-of-term tier and summary

use crate::state::legacy::LegacyTitle;
use crate::state::stats::{GameResult, Stats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermTier {
    Bad,
    Poor,
    Average,
    Good,
    Legendary,
}

impl TermTier {
    /// Tier for the summed stats
    pub fn for_total(total: i32) -> Self {
        if total >= 240 {
            Self::Legendary
        } else if total >= 200 {
            Self::Good
        } else if total >= 150 {
            Self::Average
        } else if total >= 100 {
            Self::Poor
        } else {
            Self::Bad
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Legendary => "Legendary",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
            Self::Bad => "Bad",
        }
    }

    pub fn line(&self) -> &'static str {
        match self {
            Self::Legendary => "Re-elected in a landslide. History remembers you.",
            Self::Good => "Solid term with clear wins. The people approve.",
            Self::Average => "Some highs, some lows. Respectable, not remarkable.",
            Self::Poor => "Missteps outweighed gains. Tough press conferences.",
            Self::Bad => "One-Term Wonder. Time to write that memoir.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSummary {
    pub stats: Stats,
    pub total: i32,
    pub tier: TermTier,
    pub policies_resolved: usize,
    pub world_events_seen: usize,
    pub legacy_index: f64,
    pub legacy_title: LegacyTitle,
    pub new_best: bool,
    pub result: Option<GameResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(TermTier::for_total(240), TermTier::Legendary);
        assert_eq!(TermTier::for_total(239), TermTier::Good);
        assert_eq!(TermTier::for_total(200), TermTier::Good);
        assert_eq!(TermTier::for_total(150), TermTier::Average);
        assert_eq!(TermTier::for_total(100), TermTier::Poor);
        assert_eq!(TermTier::for_total(99), TermTier::Bad);
        assert_eq!(TermTier::for_total(150).line(), "Some highs, some lows. Respectable, not remarkable.");
    }
}
