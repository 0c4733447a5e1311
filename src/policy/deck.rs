//! The hand of policy cards offered during a term
//!
//! A resolved card is marked used and its slot is refilled: a random unused
//! follow-up for the decision, else an unused card of the same category,
//! else any unused card, else the slot is dropped.

use super::catalog::{PolicyCard, PolicyCatalog};
use crate::core::random::RandomSource;
use crate::core::types::Decision;
use ahash::AHashSet;

#[derive(Debug, Clone, Default)]
pub struct PolicyDeck {
    hand: Vec<String>,
    used: AHashSet<String>,
}

impl PolicyDeck {
    pub fn new(catalog: &PolicyCatalog) -> Self {
        let mut deck = Self::default();
        deck.reset(catalog);
        deck
    }

    /// Deal the initial hand and forget used cards
    pub fn reset(&mut self, catalog: &PolicyCatalog) {
        self.used.clear();
        self.hand = catalog.initial_hand().iter().map(|c| c.id.clone()).collect();
    }

    pub fn hand<'a>(&self, catalog: &'a PolicyCatalog) -> Vec<&'a PolicyCard> {
        self.hand.iter().filter_map(|id| catalog.get(id)).collect()
    }

    pub fn hand_ids(&self) -> &[String] {
        &self.hand
    }

    pub fn in_hand(&self, id: &str) -> bool {
        self.hand.iter().any(|h| h == id)
    }

    pub fn is_used(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    fn available(&self, id: &str) -> bool {
        !self.used.contains(id) && !self.in_hand(id)
    }

    /// Choose the card that follows `current` after `decision`
    pub fn next_card<'a>(
        &self,
        catalog: &'a PolicyCatalog,
        current: &str,
        decision: Decision,
        rng: &mut dyn RandomSource,
    ) -> Option<&'a PolicyCard> {
        let card = catalog.get(current)?;

        let follow_ups: Vec<&PolicyCard> = card
            .follow_ups(decision)
            .iter()
            .filter(|id| self.available(id))
            .filter_map(|id| catalog.get(id))
            .collect();
        if !follow_ups.is_empty() {
            return Some(follow_ups[rng.index(follow_ups.len())]);
        }

        let same_category: Vec<&PolicyCard> = catalog
            .cards()
            .iter()
            .filter(|c| c.category == card.category && c.id != current && self.available(&c.id))
            .collect();
        if !same_category.is_empty() {
            return Some(same_category[rng.index(same_category.len())]);
        }

        let any: Vec<&PolicyCard> = catalog
            .cards()
            .iter()
            .filter(|c| c.id != current && self.available(&c.id))
            .collect();
        if any.is_empty() {
            None
        } else {
            Some(any[rng.index(any.len())])
        }
    }

    /// Mark `id` used and refill its slot; returns the replacement id
    pub fn resolve(
        &mut self,
        catalog: &PolicyCatalog,
        id: &str,
        decision: Decision,
        rng: &mut dyn RandomSource,
    ) -> Option<String> {
        let slot = self.hand.iter().position(|h| h == id);
        self.used.insert(id.to_string());
        let next = self
            .next_card(catalog, id, decision, rng)
            .map(|c| c.id.clone());
        match (slot, &next) {
            (Some(i), Some(next_id)) => self.hand[i] = next_id.clone(),
            (Some(i), None) => {
                self.hand.remove(i);
            }
            (None, _) => {}
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SequenceRandom;

    #[test]
    fn test_initial_hand() {
        let catalog = PolicyCatalog::bundled().unwrap();
        let deck = PolicyDeck::new(&catalog);
        assert_eq!(deck.hand_ids(), &["infrastructure", "military", "justice"]);
    }

    #[test]
    fn test_follow_up_replaces_slot() {
        let catalog = PolicyCatalog::bundled().unwrap();
        let mut deck = PolicyDeck::new(&catalog);
        let mut rng = SequenceRandom::constant(0.0);
        let next = deck.resolve(&catalog, "military", Decision::Approve, &mut rng);
        assert_eq!(next.as_deref(), Some("defense_contracts"));
        assert_eq!(deck.hand_ids()[1], "defense_contracts");
        assert!(deck.is_used("military"));
    }

    #[test]
    fn test_falls_back_to_same_category() {
        let catalog = PolicyCatalog::bundled().unwrap();
        let mut deck = PolicyDeck::new(&catalog);
        let mut rng = SequenceRandom::constant(0.0);
        deck.used.insert("defense_contracts".into());
        deck.used.insert("military_expansion".into());
        let next = deck
            .next_card(&catalog, "military", Decision::Approve, &mut rng)
            .unwrap();
        assert_eq!(next.category, catalog.get("military").unwrap().category);
        assert!(!["defense_contracts", "military_expansion", "military"].contains(&next.id.as_str()));
    }

    #[test]
    fn test_exhausted_pool_drops_slot() {
        let catalog = PolicyCatalog::bundled().unwrap();
        let mut deck = PolicyDeck::new(&catalog);
        for card in catalog.cards() {
            if card.id != "justice" {
                deck.used.insert(card.id.clone());
            }
        }
        deck.hand = vec!["justice".into()];
        let mut rng = SequenceRandom::constant(0.5);
        assert_eq!(deck.resolve(&catalog, "justice", Decision::Reject, &mut rng), None);
        assert!(deck.hand_ids().is_empty());
    }

    #[test]
    fn test_unknown_card_has_no_successor() {
        let catalog = PolicyCatalog::bundled().unwrap();
        let deck = PolicyDeck::new(&catalog);
        let mut rng = SequenceRandom::constant(0.5);
        assert!(deck.next_card(&catalog, "nope", Decision::Approve, &mut rng).is_none());
    }
}
