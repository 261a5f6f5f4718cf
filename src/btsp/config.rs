//! Bottleneck TSP configuration and search strategies.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Order in which candidate thresholds are probed.
///
/// Run to completion every strategy returns the same bottleneck; under a
/// time budget they differ in which feasible tour is found first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStrategy {
    /// Try the smallest threshold first; the first feasible one is optimal.
    SequentialUp,
    /// Find any tour, then repeatedly demand a strictly smaller bottleneck.
    SequentialDown,
    /// Bisect the sorted thresholds.
    #[default]
    BinarySearch,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::SequentialUp,
        SearchStrategy::SequentialDown,
        SearchStrategy::BinarySearch,
    ];
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchStrategy::SequentialUp => "Sequential_Up",
            SearchStrategy::SequentialDown => "Sequential_Down",
            SearchStrategy::BinarySearch => "Binary_Search",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    /// Parses the strategy name case-insensitively, with or without
    /// underscores (`"binary_search"`, `"BinarySearch"`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "sequentialup" => Ok(SearchStrategy::SequentialUp),
            "sequentialdown" => Ok(SearchStrategy::SequentialDown),
            "binarysearch" => Ok(SearchStrategy::BinarySearch),
            _ => Err(Error::invalid(format!("unknown search strategy: {s}"))),
        }
    }
}

/// Configuration for [`BottleneckTspSolver`](super::BottleneckTspSolver).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_satopt::btsp::{BtspConfig, SearchStrategy};
///
/// let config = BtspConfig::default()
///     .with_strategy(SearchStrategy::SequentialDown)
///     .with_time_limit(Duration::from_secs(30))
///     .with_lower_bound(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BtspConfig {
    /// Threshold probing order.
    pub strategy: SearchStrategy,

    /// Wall-clock budget. `None` = no limit.
    ///
    /// Checked between oracle calls; on expiry the best tour found so far
    /// is returned as unproven.
    pub time_limit: Option<Duration>,

    /// Skip thresholds below the degree-based lower bound.
    pub use_lower_bound: bool,
}

impl Default for BtspConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            time_limit: None,
            use_lower_bound: true,
        }
    }
}

impl BtspConfig {
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_lower_bound(mut self, enabled: bool) -> Self {
        self.use_lower_bound = enabled;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BtspConfig::default();
        assert_eq!(config.strategy, SearchStrategy::BinarySearch);
        assert!(config.time_limit.is_none());
        assert!(config.use_lower_bound);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = BtspConfig::default().with_time_limit(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strategy_parse_and_display() {
        for strategy in SearchStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<SearchStrategy>().unwrap(), strategy);
        }
        assert_eq!(
            "binary_search".parse::<SearchStrategy>().unwrap(),
            SearchStrategy::BinarySearch
        );
        assert_eq!(
            "SEQUENTIAL_UP".parse::<SearchStrategy>().unwrap(),
            SearchStrategy::SequentialUp
        );
        assert_eq!(
            "SequentialDown".parse::<SearchStrategy>().unwrap(),
            SearchStrategy::SequentialDown
        );
        assert!("random".parse::<SearchStrategy>().is_err());
    }
}
