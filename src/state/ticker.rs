//! Wall-clock tick pacing
//!
//! The term decrements once per real second. Rather than counting interval
//! callbacks, the ticker measures from a fixed anchor, so however often it
//! is polled the number of ticks emitted equals the whole seconds elapsed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct TermTicker {
    anchor: Option<Instant>,
    emitted: u64,
}

impl TermTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start measuring from `now`; ignored while already armed
    pub fn arm(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
            self.emitted = 0;
        }
    }

    /// Stop emitting ticks and forget the anchor
    pub fn disarm(&mut self) {
        self.anchor = None;
        self.emitted = 0;
    }

    /// Ticks owed since the last call
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        let whole_seconds = now.saturating_duration_since(anchor).as_secs();
        let due = whole_seconds.saturating_sub(self.emitted);
        self.emitted = whole_seconds.max(self.emitted);
        due.min(u32::MAX as u64) as u32
    }

    /// Time until the next tick falls due
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        let anchor = self.anchor?;
        let next = anchor + Duration::from_secs(self.emitted + 1);
        Some(next.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_emits_nothing() {
        let mut ticker = TermTicker::new();
        assert_eq!(ticker.due_ticks(Instant::now()), 0);
        assert!(ticker.until_next(Instant::now()).is_none());
    }

    #[test]
    fn test_polling_frequency_does_not_change_count() {
        let start = Instant::now();
        let mut coarse = TermTicker::new();
        let mut fine = TermTicker::new();
        coarse.arm(start);
        fine.arm(start);

        let mut fine_total = 0;
        for ms in (0..=5_500).step_by(100) {
            fine_total += fine.due_ticks(start + Duration::from_millis(ms));
        }
        let coarse_total = coarse.due_ticks(start + Duration::from_millis(5_500));

        assert_eq!(fine_total, 5);
        assert_eq!(coarse_total, 5);
    }

    #[test]
    fn test_rearm_while_armed_is_ignored() {
        let start = Instant::now();
        let mut ticker = TermTicker::new();
        ticker.arm(start);
        ticker.arm(start + Duration::from_secs(3));
        assert_eq!(ticker.due_ticks(start + Duration::from_secs(4)), 4);
    }

    #[test]
    fn test_disarm_then_arm_starts_fresh() {
        let start = Instant::now();
        let mut ticker = TermTicker::new();
        ticker.arm(start);
        assert_eq!(ticker.due_ticks(start + Duration::from_secs(2)), 2);
        ticker.disarm();
        ticker.arm(start + Duration::from_secs(10));
        assert_eq!(ticker.due_ticks(start + Duration::from_secs(11)), 1);
    }

    #[test]
    fn test_until_next() {
        let start = Instant::now();
        let mut ticker = TermTicker::new();
        ticker.arm(start);
        let wait = ticker.until_next(start + Duration::from_millis(400)).unwrap();
        assert_eq!(wait, Duration::from_millis(600));
    }
}
