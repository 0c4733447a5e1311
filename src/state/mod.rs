//! Mutable simulation state
//!
//! Every sub-model clamps on write and keeps its own bounded trend. The
//! `GameStore` owns one of each and exposes the named transitions.

pub mod cabinet;
pub mod economy;
pub mod events;
pub mod foreign;
pub mod legacy;
pub mod log;
pub mod poll;
pub mod secretary;
pub mod stats;
pub mod store;
pub mod term;
pub mod ticker;

pub use cabinet::{Cabinet, Minister, MinisterStatus, Resignation};
pub use economy::{EconomyDelta, EconomyModel, EconomySnapshot};
pub use events::{WorldEvent, WorldEventFeed};
pub use foreign::{BlocDelta, ForeignOpinion, ForeignRelations, Stance};
pub use legacy::{LegacyRecord, LegacyTracker};
pub use log::{PolicyLog, PolicyLogEntry};
pub use poll::{ExitPoll, PollDelta};
pub use secretary::{RemarkQueue, RemarkTone, SecretaryRemark};
pub use stats::{GameResult, StatLedger, Stats};
pub use store::GameStore;
pub use term::{TermClock, TermPhase, TickOutcome};
pub use ticker::TermTicker;

use crate::core::types::Seconds;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One timestamped point on a trend line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub t: Seconds,
    pub value: f64,
}

impl TrendPoint {
    pub fn new(t: Seconds, value: f64) -> Self {
        Self { t, value }
    }
}

/// Append and drop the oldest entries beyond `cap`
pub(crate) fn push_capped<T>(buf: &mut VecDeque<T>, item: T, cap: usize) {
    buf.push_back(item);
    while buf.len() > cap {
        buf.pop_front();
    }
}

/// A trend seeded with a single point at t=0
pub(crate) fn seeded_trend(value: f64) -> VecDeque<TrendPoint> {
    VecDeque::from([TrendPoint::new(0, value)])
}
