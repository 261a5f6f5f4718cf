//! k-center solver configuration.

use crate::error::{Error, Result};
use std::time::Duration;

/// How the exact solver walks the candidate radii.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadiusSearch {
    /// Bisect the sorted candidate list: `O(log m)` oracle calls.
    #[default]
    Bisection,
    /// Repeatedly probe the largest candidate below the incumbent radius
    /// until the oracle answers UNSAT.
    LinearShrink,
}

/// Configuration for [`KCenterSolver`](super::KCenterSolver).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_satopt::kcenter::{KCenterConfig, RadiusSearch};
///
/// let config = KCenterConfig::default()
///     .with_search(RadiusSearch::LinearShrink)
///     .with_time_limit(Duration::from_secs(10));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KCenterConfig {
    /// Candidate-radius search order.
    pub search: RadiusSearch,

    /// Wall-clock budget for the exact search. `None` = no limit.
    ///
    /// Checked between oracle calls only.
    pub time_limit: Option<Duration>,
}

impl KCenterConfig {
    pub fn with_search(mut self, search: RadiusSearch) -> Self {
        self.search = search;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.time_limit == Some(Duration::ZERO) {
            return Err(Error::invalid("time_limit must be positive"));
        }
        Ok(())
    }
}
