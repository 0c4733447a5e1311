//! Queue of secretary remarks waiting to be shown

use crate::core::types::Seconds;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemarkTone {
    Surprised,
    Proud,
    Neutral,
    Concerned,
    Roast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretaryRemark {
    pub id: Uuid,
    pub text: String,
    pub tone: RemarkTone,
    pub time: Seconds,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemarkQueue {
    queue: VecDeque<SecretaryRemark>,
}

impl RemarkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str, tone: RemarkTone, time: Seconds) -> Uuid {
        let id = Uuid::new_v4();
        self.queue.push_back(SecretaryRemark {
            id,
            text: text.to_string(),
            tone,
            time,
        });
        id
    }

    /// Take the oldest remark
    pub fn shift(&mut self) -> Option<SecretaryRemark> {
        self.queue.pop_front()
    }

    pub fn peek(&self) -> Option<&SecretaryRemark> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
