//! Surfaced world events and the headline de-duplication window

use super::push_capped;
use crate::core::types::{Seconds, Urgency};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub id: u64,
    pub headline: String,
    pub detail: String,
    pub urgency: Urgency,
    pub time: Seconds,
}

/// Live events plus the recently used headlines
///
/// Clearing the feed drops the events but keeps the headline window, so a
/// fresh term still avoids last term's headlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldEventFeed {
    events: Vec<WorldEvent>,
    used_headlines: VecDeque<String>,
    window: usize,
    next_event_id: u64,
    surfaced: usize,
}

impl WorldEventFeed {
    pub fn new(window: usize) -> Self {
        Self {
            events: Vec::new(),
            used_headlines: VecDeque::new(),
            window,
            next_event_id: 1,
            surfaced: 0,
        }
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    /// Events surfaced since the last clear, dismissed ones included
    pub fn surfaced(&self) -> usize {
        self.surfaced
    }

    pub fn used_headlines(&self) -> &VecDeque<String> {
        &self.used_headlines
    }

    pub fn is_headline_used(&self, headline: &str) -> bool {
        self.used_headlines.iter().any(|h| h == headline)
    }

    pub fn mark_headline_used(&mut self, headline: &str) {
        if self.window > 0 {
            push_capped(&mut self.used_headlines, headline.to_string(), self.window);
        }
    }

    /// Surface an event and mark its headline used
    pub fn add(&mut self, headline: &str, detail: &str, urgency: Urgency, time: Seconds) -> &WorldEvent {
        let id = self.next_event_id;
        self.next_event_id += 1;
        self.surfaced += 1;
        self.mark_headline_used(headline);
        self.events.push(WorldEvent {
            id,
            headline: headline.to_string(),
            detail: detail.to_string(),
            urgency,
            time,
        });
        &self.events[self.events.len() - 1]
    }

    /// Dismiss one event; returns whether it existed
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.surfaced = 0;
    }
}
