//! k-center heuristic and exact search.
//!
//! # Algorithm
//!
//! 1. Farthest-point greedy gives `k` centers and an upper bound `ub`
//!    (a 2-approximation on metric instances).
//! 2. The optimal radius is one of the pairwise distances, so the
//!    candidates are the sorted distinct distances `<= ub`.
//! 3. Each probe builds a fresh [`KCenterDecisionEncoder`]. A SAT answer
//!    becomes the incumbent and caps the search at its achieved radius;
//!    an UNSAT answer raises the lower end.
//!
//! # Reference
//!
//! Gonzalez, T. (1985). "Clustering to minimize the maximum intercluster
//! distance", *Theoretical Computer Science* 38, 293-306.

use super::config::{KCenterConfig, RadiusSearch};
use super::decision::KCenterDecisionEncoder;
use crate::distance::DistanceOracle;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::sat::{SatOracle, VarisatOracle};
use crate::status::SolveStatus;
use crate::timer::Timer;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of an exact k-center run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KCenterResult {
    /// Selected centers (at most `k`), ascending.
    pub centers: Vec<NodeId>,

    /// Covering radius achieved by `centers`.
    pub radius: f64,

    /// Covering radius of the greedy starting solution.
    pub heuristic_radius: f64,

    /// `Optimal` when run to completion, `Feasible` when the time budget
    /// stopped the search early.
    pub status: SolveStatus,

    /// Number of decision-oracle probes.
    pub oracle_calls: usize,
}

/// Solver for the k-center problem on a possibly incomplete graph.
///
/// Generic over the oracle so the encoders stay solver-agnostic; each
/// probe uses a fresh `O::default()`.
///
/// # Examples
///
/// ```
/// use u_satopt::graph::Graph;
/// use u_satopt::kcenter::KCenterSolver;
///
/// let graph = Graph::from_edges(
///     4,
///     [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 10.0), (1, 3, 10.0)],
/// ).unwrap();
/// let solver = KCenterSolver::new(&graph).unwrap();
/// let result = solver.solve_exact(2).unwrap();
/// assert_eq!(result.radius, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct KCenterSolver<O = VarisatOracle> {
    distances: Arc<DistanceOracle>,
    config: KCenterConfig,
    _oracle: PhantomData<fn() -> O>,
}

impl KCenterSolver<VarisatOracle> {
    /// Builds the distance table of `graph` and a solver with the default
    /// configuration.
    pub fn new(graph: &Graph) -> Result<Self> {
        Self::from_distances(Arc::new(DistanceOracle::build(graph)?))
    }
}

impl<O: SatOracle + Default> KCenterSolver<O> {
    /// Creates a solver over a shared distance table.
    pub fn from_distances(distances: Arc<DistanceOracle>) -> Result<Self> {
        Ok(Self {
            distances,
            config: KCenterConfig::default(),
            _oracle: PhantomData,
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: KCenterConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn distances(&self) -> &DistanceOracle {
        &self.distances
    }

    fn check_k(&self, k: usize) -> Result<()> {
        let n = self.distances.num_nodes();
        if k == 0 || k > n {
            return Err(Error::invalid(format!("k must be in 1..={n}, got {k}")));
        }
        Ok(())
    }

    /// Farthest-point greedy: start from node 0, then `k - 1` times add the
    /// node farthest from its nearest center (first in id order on ties).
    ///
    /// Returns exactly `k` distinct centers.
    pub fn solve_heuristic(&self, k: usize) -> Result<Vec<NodeId>> {
        self.check_k(k)?;
        let d = &*self.distances;

        let mut centers = vec![0];
        let mut is_center = vec![false; d.num_nodes()];
        is_center[0] = true;
        let mut nearest: Vec<f64> = d.nodes().map(|u| d.dist(0, u)).collect();

        while centers.len() < k {
            let mut farthest: Option<(NodeId, f64)> = None;
            for u in d.nodes().filter(|&u| !is_center[u]) {
                if farthest.is_none_or(|(_, best)| nearest[u] > best) {
                    farthest = Some((u, nearest[u]));
                }
            }
            // k <= n, so a non-center always remains here.
            let Some((next, _)) = farthest else { break };

            centers.push(next);
            is_center[next] = true;
            for u in d.nodes() {
                nearest[u] = nearest[u].min(d.dist(next, u));
            }
        }

        Ok(centers)
    }

    /// Optimal k-center by decision probes over candidate radii.
    pub fn solve_exact(&self, k: usize) -> Result<KCenterResult> {
        let timer = Timer::new(self.config.time_limit);
        let d = &*self.distances;

        let mut centers = self.solve_heuristic(k)?;
        let heuristic_radius = d.max_nearest_distance(&centers)?;
        let mut radius = heuristic_radius;

        let candidates: Vec<f64> = d
            .sorted_distinct_distances()
            .into_iter()
            .filter(|&r| r <= heuristic_radius)
            .collect();

        let mut oracle_calls = 0usize;
        let mut timed_out = false;

        match self.config.search {
            RadiusSearch::Bisection => {
                // Smallest feasible index lies in [lo, hi); `hi` indexes the
                // incumbent radius, or is the length if none is finite.
                let mut lo = 0usize;
                let mut hi = index_of(&candidates, radius);
                while lo < hi {
                    if timer.is_expired() {
                        timed_out = true;
                        break;
                    }
                    let mid = lo + (hi - lo) / 2;
                    oracle_calls += 1;
                    match self.probe(k, candidates[mid])? {
                        Some(found) => {
                            radius = d.max_nearest_distance(&found)?;
                            centers = found;
                            hi = index_of(&candidates, radius).min(mid);
                        }
                        None => lo = mid + 1,
                    }
                }
            }
            RadiusSearch::LinearShrink => loop {
                let Some(&next) = candidates.iter().rev().find(|&&r| r < radius) else {
                    break;
                };
                if timer.is_expired() {
                    timed_out = true;
                    break;
                }
                oracle_calls += 1;
                // A SAT answer covers within `next < radius`, so the radius
                // strictly shrinks every round.
                match self.probe(k, next)? {
                    Some(found) => {
                        radius = d.max_nearest_distance(&found)?;
                        centers = found;
                    }
                    None => break,
                }
            },
        }

        centers.sort_unstable();
        let status = if timed_out {
            warn!(k, radius, elapsed = ?timer.elapsed(), "k-center budget exhausted");
            SolveStatus::Feasible
        } else {
            SolveStatus::Optimal
        };
        info!(k, radius, heuristic_radius, oracle_calls, ?status, "k-center solved");

        Ok(KCenterResult {
            centers,
            radius,
            heuristic_radius,
            status,
            oracle_calls,
        })
    }

    fn probe(&self, k: usize, radius: f64) -> Result<Option<Vec<NodeId>>> {
        let mut encoder = KCenterDecisionEncoder::with_oracle(&self.distances, k, radius, O::default())?;
        encoder.solve()
    }
}

/// Index of `value` in the ascending `candidates`, or `candidates.len()`
/// if every candidate is smaller (e.g. an infinite radius).
fn index_of(candidates: &[f64], value: f64) -> usize {
    candidates.partition_point(|&c| c < value)
}
