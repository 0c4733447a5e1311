//! Policy card pool loaded from TOML

use crate::core::error::{PoliticsError, Result};
use crate::core::types::{Decision, Difficulty};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUNDLED_POOL: &str = include_str!("../../data/policy_pool.toml");

/// Cards dealt at the start of every term
pub const INITIAL_HAND: [&str; 3] = ["infrastructure", "military", "justice"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyCategory {
    Economic,
    Defense,
    Social,
    Diplomatic,
    Education,
    Security,
    Environment,
    Technology,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: PolicyCategory,
    #[serde(default)]
    pub next_on_approve: Vec<String>,
    #[serde(default)]
    pub next_on_reject: Vec<String>,
}

impl PolicyCard {
    pub fn follow_ups(&self, decision: Decision) -> &[String] {
        match decision {
            Decision::Approve => &self.next_on_approve,
            Decision::Reject => &self.next_on_reject,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PoolFile {
    cards: Vec<PolicyCard>,
}

#[derive(Debug, Clone)]
pub struct PolicyCatalog {
    cards: Vec<PolicyCard>,
    by_id: AHashMap<String, usize>,
}

impl PolicyCatalog {
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_POOL)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a pool; ids must be unique and every follow-up must exist
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PoolFile = toml::from_str(content)?;
        let mut by_id = AHashMap::with_capacity(file.cards.len());
        for (i, card) in file.cards.iter().enumerate() {
            if by_id.insert(card.id.clone(), i).is_some() {
                return Err(PoliticsError::InvalidConfig(format!(
                    "duplicate policy id '{}'",
                    card.id
                )));
            }
        }
        for card in &file.cards {
            for next in card.next_on_approve.iter().chain(&card.next_on_reject) {
                if !by_id.contains_key(next) {
                    return Err(PoliticsError::InvalidConfig(format!(
                        "policy '{}' follows up with unknown '{}'",
                        card.id, next
                    )));
                }
            }
        }
        Ok(Self {
            cards: file.cards,
            by_id,
        })
    }

    pub fn get(&self, id: &str) -> Option<&PolicyCard> {
        self.by_id.get(id).map(|&i| &self.cards[i])
    }

    pub fn cards(&self) -> &[PolicyCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Initial hand cards present in this pool
    pub fn initial_hand(&self) -> Vec<&PolicyCard> {
        INITIAL_HAND.iter().filter_map(|id| self.get(id)).collect()
    }
}
