//! Per-move time budget handed to engines.
//!
//! The budget is advisory to the engine (`go movetime`); the caller enforces
//! it only loosely, allowing a grace period before it gives up on a reply.

use std::time::{Duration, Instant};

/// Limits for a single move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Thinking time the engine is asked to use
    pub move_time: Duration,
    /// Slack on top of `move_time` before the engine is told to stop, and
    /// again before it is considered hung
    pub grace: Duration,
}

impl SearchLimits {
    pub fn new(move_time: Duration, grace: Duration) -> Self {
        Self { move_time, grace }
    }

    pub fn move_time(move_time: Duration) -> Self {
        Self {
            move_time,
            ..Self::default()
        }
    }

    /// Time after which a silent engine is asked to stop.
    pub fn soft_limit(&self) -> Duration {
        self.move_time + self.grace
    }

    /// Time after which a silent engine is considered hung.
    pub fn hard_limit(&self) -> Duration {
        self.move_time + self.grace * 2
    }

    /// `move_time` in whole milliseconds, as sent over UCI.
    pub fn move_time_ms(&self) -> u128 {
        self.move_time.as_millis()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            move_time: Duration::from_secs(1),
            grace: Duration::from_secs(1),
        }
    }
}

/// A point in time by which something has to happen.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn after(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// Move the deadline `extra` further out.
    pub fn extend(&mut self, extra: Duration) {
        self.limit += extra;
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }

    pub fn expired(&self) -> bool {
        self.remaining().is_zero()
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
