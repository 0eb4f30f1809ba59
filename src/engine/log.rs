//! Notification log - bounded, observational, never read back by the engine

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Ordered log of human-readable event lines, keeping only the most recent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationLog {
    entries: VecDeque<String>,
    cap: usize,
}

impl NotificationLog {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Append a line, evicting the oldest beyond the cap
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_back(line.into());
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
