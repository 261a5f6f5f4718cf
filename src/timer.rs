//! Wall-clock budget shared by the iterative solvers.
//!
//! An oracle call is never interrupted. Solvers consult [`Timer::is_expired`]
//! between successive calls and stop with their best incumbent.

use std::time::{Duration, Instant};

/// A started stopwatch with an optional limit.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
    limit: Option<Duration>,
}

impl Timer {
    /// Starts a timer. `None` means no budget.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// Starts a timer that never expires.
    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Time since the timer was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Remaining budget, `None` if unlimited. Saturates at zero.
    pub fn remaining(&self) -> Option<Duration> {
        self.limit.map(|limit| limit.saturating_sub(self.elapsed()))
    }

    /// Whether the budget has been used up.
    pub fn is_expired(&self) -> bool {
        match self.limit {
            Some(limit) => self.elapsed() >= limit,
            None => false,
        }
    }

    /// The configured budget, `None` if unlimited.
    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::unlimited()
    }
}
