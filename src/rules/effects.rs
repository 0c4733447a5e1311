//! Headline stat effect table loaded from TOML
//!
//! Layout: `[<policy_id>.<difficulty>]` with `approved` and `rejected`
//! inline tables of `{ approval, power, standing }`.

use crate::core::error::{PoliticsError, Result};
use crate::core::types::{Difficulty, StatDelta};
use ahash::AHashMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const BUNDLED_EFFECTS: &str = include_str!("../../data/policy_effects.toml");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
struct EffectPair {
    #[serde(default)]
    approved: StatDelta,
    #[serde(default)]
    rejected: StatDelta,
}

fn parse_difficulty(key: &str) -> Option<Difficulty> {
    match key {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

/// Maps `(policy_id, difficulty, approved)` to a stat delta
#[derive(Debug, Clone, Default)]
pub struct PolicyEffectTable {
    effects: AHashMap<String, AHashMap<Difficulty, EffectPair>>,
}

impl PolicyEffectTable {
    /// The table shipped in `data/policy_effects.toml`
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_EFFECTS)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: AHashMap<String, AHashMap<String, EffectPair>> = toml::from_str(content)?;
        let mut effects = AHashMap::new();
        for (policy_id, by_key) in raw {
            let mut by_difficulty = AHashMap::new();
            for (key, pair) in by_key {
                let difficulty = parse_difficulty(&key).ok_or_else(|| {
                    PoliticsError::InvalidConfig(format!(
                        "unknown difficulty '{}' for policy '{}'",
                        key, policy_id
                    ))
                })?;
                by_difficulty.insert(difficulty, pair);
            }
            effects.insert(policy_id, by_difficulty);
        }
        Ok(Self { effects })
    }

    /// Unknown keys resolve to a zero delta
    pub fn lookup(&self, policy_id: &str, difficulty: Difficulty, approved: bool) -> StatDelta {
        match self.effects.get(policy_id).and_then(|m| m.get(&difficulty)) {
            Some(pair) if approved => pair.approved,
            Some(pair) => pair.rejected,
            None => StatDelta::zero(),
        }
    }

    pub fn contains(&self, policy_id: &str, difficulty: Difficulty) -> bool {
        self.effects
            .get(policy_id)
            .is_some_and(|m| m.contains_key(&difficulty))
    }

    /// Number of `(policy, difficulty)` entries
    pub fn len(&self) -> usize {
        self.effects.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_table() {
        let table = PolicyEffectTable::bundled().unwrap();
        assert_eq!(table.len(), 9);
        assert_eq!(
            table.lookup("military", Difficulty::Hard, true),
            StatDelta::new(-6, 12, 8)
        );
        assert_eq!(
            table.lookup("infrastructure", Difficulty::Easy, false),
            StatDelta::new(-3, 1, -2)
        );
    }

    #[test]
    fn test_unknown_key_is_zero() {
        let table = PolicyEffectTable::bundled().unwrap();
        assert_eq!(table.lookup("fuel_tax", Difficulty::Medium, true), StatDelta::zero());
        assert!(!table.contains("fuel_tax", Difficulty::Medium));
    }

    #[test]
    fn test_custom_table_with_missing_side() {
        let table = PolicyEffectTable::from_toml_str(
            "[tariffs.easy]\napproved = { approval = 2 }\n",
        )
        .unwrap();
        assert_eq!(table.lookup("tariffs", Difficulty::Easy, true), StatDelta::new(2, 0, 0));
        assert_eq!(table.lookup("tariffs", Difficulty::Easy, false), StatDelta::zero());
    }

    #[test]
    fn test_bad_difficulty_rejected() {
        let result = PolicyEffectTable::from_toml_str("[tariffs.brutal]\napproved = {}\n");
        assert!(matches!(result, Err(PoliticsError::InvalidConfig(_))));
    }
}
