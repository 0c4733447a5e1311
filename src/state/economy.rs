//! Macro indicators
//!
//! Five correlated fields, each with its own closed range. A snapshot is
//! appended after every mutation, never on plain ticks.

use super::push_capped;
use crate::core::types::{clamp_f64, Seconds};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const GDP_RANGE: (f64, f64) = (70.0, 140.0);
pub const INFL_RANGE: (f64, f64) = (1.0, 15.0);
pub const UNEMP_RANGE: (f64, f64) = (2.0, 20.0);
pub const MARKET_RANGE: (f64, f64) = (60.0, 160.0);
pub const CONF_RANGE: (f64, f64) = (0.0, 100.0);

/// Change to each indicator; zero fields leave the value alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyDelta {
    pub gdp: f64,
    pub infl: f64,
    pub unemp: f64,
    pub market: f64,
    pub conf: f64,
}

impl EconomyDelta {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            gdp: self.gdp * factor,
            infl: self.infl * factor,
            unemp: self.unemp * factor,
            market: self.market * factor,
            conf: self.conf * factor,
        }
    }
}

/// Indicator values at a point in the term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomySnapshot {
    pub t: Seconds,
    pub gdp: f64,
    pub infl: f64,
    pub unemp: f64,
    pub market: f64,
    pub conf: f64,
}

impl EconomySnapshot {
    pub fn seed() -> Self {
        Self {
            t: 0,
            gdp: 100.0,
            infl: 4.0,
            unemp: 6.0,
            market: 100.0,
            conf: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyModel {
    current: EconomySnapshot,
    history: VecDeque<EconomySnapshot>,
    history_cap: usize,
}

impl EconomyModel {
    pub fn new(history_cap: usize) -> Self {
        let seed = EconomySnapshot::seed();
        Self {
            current: seed,
            history: VecDeque::from([seed]),
            history_cap,
        }
    }

    pub fn current(&self) -> &EconomySnapshot {
        &self.current
    }

    pub fn gdp(&self) -> f64 {
        self.current.gdp
    }

    pub fn infl(&self) -> f64 {
        self.current.infl
    }

    pub fn unemp(&self) -> f64 {
        self.current.unemp
    }

    pub fn market(&self) -> f64 {
        self.current.market
    }

    pub fn conf(&self) -> f64 {
        self.current.conf
    }

    pub fn history(&self) -> &VecDeque<EconomySnapshot> {
        &self.history
    }

    /// Reset to the seed snapshot
    pub fn init(&mut self) {
        *self = Self::new(self.history_cap);
    }

    /// Apply a delta at elapsed time `t` and record a snapshot
    pub fn apply(&mut self, delta: &EconomyDelta, t: Seconds) {
        let c = &self.current;
        self.current = EconomySnapshot {
            t,
            gdp: clamp_f64(c.gdp + delta.gdp, GDP_RANGE),
            infl: clamp_f64(c.infl + delta.infl, INFL_RANGE),
            unemp: clamp_f64(c.unemp + delta.unemp, UNEMP_RANGE),
            market: clamp_f64(c.market + delta.market, MARKET_RANGE),
            conf: clamp_f64(c.conf + delta.conf, CONF_RANGE),
        };
        push_capped(&mut self.history, self.current, self.history_cap);
    }
}
