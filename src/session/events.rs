//! Session events - what changed, for pollers

use crate::core::types::HandleId;
use crate::progression::Verdict;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Answered { chapter: usize, task: usize, verdict: Verdict },
    OptionToggled { option: String, selected: bool },
    Advanced { chapter: usize, task: usize },
    Jumped { chapter: usize, task: usize },
    Reset,
    WrongHandle { handle: HandleId },
    HandleDisconnected { handle: HandleId },
    ModuleCompleted,
}

/// Bounded queue of undrained events
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<SessionEvent>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event, dropping the oldest when full
    pub fn push(&mut self, event: SessionEvent) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        self.entries.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
