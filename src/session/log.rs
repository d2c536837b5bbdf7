//! Bounded trailing activity log surfaced on the live session display.

use std::collections::VecDeque;

/// Rolling window of the most recent operator-visible log lines. Once the
/// capacity is reached the oldest entry is dropped for each new one.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        let mut log = Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        };
        log.push("Core intelligence ready.");
        log.push("Awaiting bridge authorization...");
        log
    }

    /// Append a line, prefixed with the current wall-clock time.
    pub fn push(&mut self, message: &str) {
        let stamped = format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), message);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(stamped);
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Whether any retained entry contains the given fragment.
    pub fn contains(&self, fragment: &str) -> bool {
        self.entries.iter().any(|entry| entry.contains(fragment))
    }
}
