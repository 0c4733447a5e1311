//! Append-only record of resolved policies

use crate::core::types::{Decision, RoundResult, Seconds, StatDelta};
use serde::{Deserialize, Serialize};

/// One resolved policy; `id` is the policy id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyLogEntry {
    pub id: String,
    pub title: String,
    pub decision: Decision,
    pub result: RoundResult,
    pub delta: StatDelta,
    pub time: Seconds,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyLog {
    entries: Vec<PolicyLogEntry>,
}

impl PolicyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PolicyLogEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[PolicyLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> &[PolicyLogEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    /// First entry for a policy id
    pub fn first_for(&self, id: &str) -> Option<&PolicyLogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn count_decisions(&self, decision: Decision) -> usize {
        self.entries.iter().filter(|e| e.decision == decision).count()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, decision: Decision, result: RoundResult) -> PolicyLogEntry {
        PolicyLogEntry {
            id: id.into(),
            title: id.into(),
            decision,
            result,
            delta: StatDelta::zero(),
            time: 0,
        }
    }

    #[test]
    fn test_recent_and_counts() {
        let mut log = PolicyLog::new();
        log.push(entry("a", Decision::Approve, RoundResult::Win));
        log.push(entry("b", Decision::Reject, RoundResult::Loss));
        log.push(entry("c", Decision::Reject, RoundResult::Loss));

        assert_eq!(log.recent(2).len(), 2);
        assert_eq!(log.recent(2)[0].id, "b");
        assert_eq!(log.recent(10).len(), 3);
        assert_eq!(log.count_decisions(Decision::Reject), 2);
        assert_eq!(log.first_for("b").map(|e| e.decision), Some(Decision::Reject));
        assert!(log.first_for("zzz").is_none());
    }

    #[test]
    fn test_clear() {
        let mut log = PolicyLog::new();
        log.push(entry("a", Decision::Approve, RoundResult::Win));
        log.clear();
        assert!(log.is_empty());
        assert!(log.recent(2).is_empty());
    }
}
