//! k-center facility placement.
//!
//! Choose at most `k` nodes ("centers") minimizing the largest distance from
//! any node to its nearest center. Distances are shortest-path distances, so
//! the input graph need not be complete.
//!
//! # Key Components
//!
//! - [`KCenterDecisionEncoder`]: SAT instance for one fixed radius
//! - [`KCenterSolver`]: greedy upper bound, then certified optimal search
//! - [`KCenterConfig`]: search order and time budget
//!
//! # References
//!
//! - Gonzalez (1985), "Clustering to minimize the maximum intercluster distance"
//! - Hochbaum & Shmoys (1985), "A best possible heuristic for the k-center problem"

mod config;
mod decision;
mod runner;

pub use config::{KCenterConfig, RadiusSearch};
pub use decision::KCenterDecisionEncoder;
pub use runner::{KCenterResult, KCenterSolver};
