//! Execution statistics tracking.
//!
//! This module provides thread-safe counters for what the request execution
//! policy did: transport calls, cache hits and misses, retries, rate-limit
//! rejections and failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ExecutionEvent;

/// Thread-safe execution statistics tracker.
///
/// Uses one atomic counter per `ExecutionEvent`, all initialized to zero on
/// creation, so it can be shared across tasks with `Arc`.
pub struct ExecutionStats {
    events: HashMap<ExecutionEvent, AtomicUsize>,
}

impl ExecutionStats {
    pub fn new() -> Self {
        let mut events = HashMap::new();
        for event in ExecutionEvent::iter() {
            events.insert(event, AtomicUsize::new(0));
        }
        ExecutionStats { events }
    }

    /// Increment an event counter.
    pub fn increment(&self, event: ExecutionEvent) {
        if let Some(counter) = self.events.get(&event) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in ExecutionStats initialization.",
                event
            );
        }
    }

    /// Get the count for an event.
    pub fn get(&self, event: ExecutionEvent) -> usize {
        self.events
            .get(&event)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Snapshot of every counter, in declaration order.
    pub fn snapshot(&self) -> Vec<(ExecutionEvent, usize)> {
        ExecutionEvent::iter().map(|e| (e, self.get(e))).collect()
    }

    /// Logs every non-zero counter at info level.
    pub fn log_summary(&self) {
        for (event, count) in self.snapshot() {
            if count > 0 {
                log::info!("{}: {}", event, count);
            }
        }
    }
}

impl Default for ExecutionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExecutionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.snapshot()).finish()
    }
}
