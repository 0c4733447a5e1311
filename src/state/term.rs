//! Term lifecycle
//!
//! A term runs `Idle -> Running -> Over -> (reset) -> Idle`. The epoch
//! counter changes on every start and reset; a resolution captured under an
//! older epoch belongs to a term that no longer exists.

use crate::core::types::Seconds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermPhase {
    Idle,
    Running,
    Over,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Term was not running
    Ignored,
    /// One second elapsed
    Counted,
    /// The last second elapsed and the term is now over
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermClock {
    seconds_total: Seconds,
    seconds_left: Seconds,
    phase: TermPhase,
    epoch: u64,
}

impl TermClock {
    pub fn new(seconds_total: Seconds) -> Self {
        Self {
            seconds_total,
            seconds_left: seconds_total,
            phase: TermPhase::Idle,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> TermPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TermPhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == TermPhase::Over
    }

    pub fn seconds_total(&self) -> Seconds {
        self.seconds_total
    }

    pub fn seconds_left(&self) -> Seconds {
        self.seconds_left
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Seconds since the term started
    pub fn elapsed(&self) -> Seconds {
        self.seconds_total - self.seconds_left
    }

    /// Idle -> Running; returns false if the term was not idle
    pub fn start(&mut self) -> bool {
        if self.phase != TermPhase::Idle {
            return false;
        }
        self.phase = TermPhase::Running;
        self.epoch += 1;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != TermPhase::Running {
            return TickOutcome::Ignored;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.phase = TermPhase::Over;
            TickOutcome::Expired
        } else {
            TickOutcome::Counted
        }
    }

    /// Running -> Over; returns false if the term was not running
    pub fn end(&mut self) -> bool {
        if self.phase != TermPhase::Running {
            return false;
        }
        self.phase = TermPhase::Over;
        true
    }

    /// Back to Idle with the full duration
    pub fn reset(&mut self) {
        self.seconds_left = self.seconds_total;
        self.phase = TermPhase::Idle;
        self.epoch += 1;
    }
}

/// Format seconds as `m:ss`
pub fn format_clock(seconds: Seconds) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
