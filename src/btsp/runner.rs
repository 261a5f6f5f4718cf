//! Bottleneck TSP search loop.
//!
//! # Algorithm
//!
//! 1. Candidate thresholds are the distinct edge weights, ascending,
//!    optionally cut below the degree lower bound.
//! 2. A probe keeps only edges of weight `<= threshold` and asks a fresh
//!    [`HamiltonianCycleEncoder`] whether that subgraph has a tour.
//! 3. Feasible probes cap the search at the tour's actual bottleneck;
//!    infeasible probes raise the lower end. The strategy decides the order.
//!
//! # Reference
//!
//! Garfinkel, R. S. & Gilbert, K. C. (1978). "The Bottleneck Traveling
//! Salesman Problem: Algorithms and Probabilistic Analysis", *JACM* 25(3).

use super::config::{BtspConfig, SearchStrategy};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::hamiltonian::{Cycle, CycleSearch, HamiltonianCycleEncoder};
use crate::sat::{SatOracle, VarisatOracle};
use crate::status::SolveStatus;
use crate::timer::Timer;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of a bottleneck TSP run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BtspResult {
    /// Best tour found, if any.
    pub cycle: Option<Cycle>,

    /// Largest edge weight on `cycle`.
    pub bottleneck: Option<f64>,

    /// `Optimal` / `Infeasible` when proven; `Feasible` / `Timeout` when the
    /// budget cut the search short.
    pub status: SolveStatus,

    /// Degree-based lower bound on the bottleneck.
    pub lower_bound: f64,

    /// Thresholds probed.
    pub probes: usize,

    /// Oracle `solve()` calls over all probes.
    pub oracle_calls: usize,

    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Minimizes the largest edge weight of a Hamiltonian tour on a complete
/// graph with nonnegative weights.
///
/// # Examples
///
/// ```
/// use u_satopt::btsp::BottleneckTspSolver;
/// use u_satopt::graph::generators;
///
/// let graph = generators::complete(5, 3.0);
/// let result = BottleneckTspSolver::new(&graph).unwrap().optimize_bottleneck().unwrap();
/// assert_eq!(result.bottleneck, Some(3.0));
/// assert!(result.status.is_proven());
/// ```
#[derive(Debug, Clone)]
pub struct BottleneckTspSolver<'g, O = VarisatOracle> {
    graph: &'g Graph,
    /// Distinct edge weights, ascending.
    weights: Vec<f64>,
    lower_bound: f64,
    config: BtspConfig,
    _oracle: PhantomData<fn() -> O>,
}

impl<'g> BottleneckTspSolver<'g, VarisatOracle> {
    /// Creates a solver backed by [`VarisatOracle`].
    pub fn new(graph: &'g Graph) -> Result<Self> {
        Self::with_backend(graph)
    }
}

impl<'g, O: SatOracle + Default> BottleneckTspSolver<'g, O> {
    /// Creates a solver whose probes run on fresh `O::default()` oracles.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the graph is empty, not complete, or has a
    /// negative edge weight.
    pub fn with_backend(graph: &'g Graph) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::invalid("graph has no nodes"));
        }
        if !graph.is_complete() {
            return Err(Error::invalid(format!(
                "bottleneck TSP needs a complete graph: {} of {} edges present",
                graph.num_edges(),
                graph.num_nodes() * (graph.num_nodes() - 1) / 2
            )));
        }
        if let Some(edge) = graph.find_negative_edge() {
            return Err(Error::invalid(format!(
                "edge ({}, {}) has negative weight {}",
                edge.key.0, edge.key.1, edge.weight
            )));
        }

        let mut weights: Vec<f64> = graph.edges().iter().map(|e| e.weight).collect();
        weights.sort_by(f64::total_cmp);
        weights.dedup();

        Ok(Self {
            graph,
            weights,
            lower_bound: degree_lower_bound(graph),
            config: BtspConfig::default(),
            _oracle: PhantomData,
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: BtspConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Every tour uses two edges at every node, so no bottleneck is below
    /// the largest second-smallest incident weight.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Thresholds the configured search will consider, ascending.
    pub fn candidate_thresholds(&self) -> Vec<f64> {
        if self.config.use_lower_bound {
            self.weights
                .iter()
                .copied()
                .filter(|&w| w >= self.lower_bound)
                .collect()
        } else {
            self.weights.clone()
        }
    }

    /// Runs the configured search.
    pub fn optimize_bottleneck(&self) -> Result<BtspResult> {
        let timer = Timer::new(self.config.time_limit);
        let candidates = self.candidate_thresholds();
        let mut search = SearchState::default();

        match self.config.strategy {
            SearchStrategy::BinarySearch => self.bisect(&candidates, &timer, &mut search)?,
            SearchStrategy::SequentialUp => self.ascend(&candidates, &timer, &mut search)?,
            SearchStrategy::SequentialDown => self.descend(&candidates, &timer, &mut search)?,
        }

        let status = match (&search.incumbent, search.timed_out) {
            (Some(_), false) => SolveStatus::Optimal,
            (None, false) => SolveStatus::Infeasible,
            (Some(_), true) => SolveStatus::Feasible,
            (None, true) => SolveStatus::Timeout,
        };
        let (cycle, bottleneck) = match search.incumbent {
            Some((cycle, b)) => (Some(cycle), Some(b)),
            None => (None, None),
        };

        if search.timed_out {
            warn!(
                ?bottleneck,
                elapsed = ?timer.elapsed(),
                "bottleneck TSP budget exhausted; result not proven optimal"
            );
        }
        info!(
            strategy = %self.config.strategy,
            ?bottleneck,
            ?status,
            probes = search.probes,
            oracle_calls = search.oracle_calls,
            "bottleneck TSP finished"
        );

        Ok(BtspResult {
            cycle,
            bottleneck,
            status,
            lower_bound: self.lower_bound,
            probes: search.probes,
            oracle_calls: search.oracle_calls,
            elapsed: timer.elapsed(),
        })
    }

    /// Smallest feasible index lies in `[lo, hi)`; `hi` indexes the
    /// incumbent's bottleneck or is the length while none is known.
    fn bisect(&self, candidates: &[f64], timer: &Timer, search: &mut SearchState) -> Result<()> {
        let (mut lo, mut hi) = (0usize, candidates.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.probe(candidates[mid], timer, search)? {
                Probe::Feasible(bottleneck) => {
                    hi = candidates.partition_point(|&c| c < bottleneck).min(mid);
                }
                Probe::Infeasible => lo = mid + 1,
                Probe::TimedOut => break,
            }
        }
        Ok(())
    }

    fn ascend(&self, candidates: &[f64], timer: &Timer, search: &mut SearchState) -> Result<()> {
        for &threshold in candidates {
            match self.probe(threshold, timer, search)? {
                Probe::Infeasible => continue,
                Probe::Feasible(_) | Probe::TimedOut => break,
            }
        }
        Ok(())
    }

    fn descend(&self, candidates: &[f64], timer: &Timer, search: &mut SearchState) -> Result<()> {
        let mut bound = f64::INFINITY;
        while let Some(&threshold) = candidates.iter().rev().find(|&&c| c < bound) {
            match self.probe(threshold, timer, search)? {
                Probe::Feasible(bottleneck) => bound = bottleneck,
                Probe::Infeasible | Probe::TimedOut => break,
            }
        }
        Ok(())
    }

    /// One feasibility query on the threshold subgraph. Records a found
    /// tour as the new incumbent.
    fn probe(&self, threshold: f64, timer: &Timer, search: &mut SearchState) -> Result<Probe> {
        if timer.is_expired() {
            search.timed_out = true;
            return Ok(Probe::TimedOut);
        }
        search.probes += 1;

        let subgraph = self.graph.filter_edges(|e| e.weight <= threshold);
        let mut encoder = HamiltonianCycleEncoder::with_oracle(&subgraph, O::default())?;
        let outcome = encoder.solve_within(*timer)?;
        search.oracle_calls += encoder.stats().oracle_calls;

        let probe = match outcome {
            CycleSearch::Found(cycle) => {
                let bottleneck = cycle.bottleneck(self.graph).unwrap_or(threshold);
                search.incumbent = Some((cycle, bottleneck));
                Probe::Feasible(bottleneck)
            }
            CycleSearch::NoCycle => Probe::Infeasible,
            CycleSearch::TimedOut => {
                search.timed_out = true;
                Probe::TimedOut
            }
        };
        debug!(threshold, edges = subgraph.num_edges(), ?probe, "bottleneck probe");
        Ok(probe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Probe {
    Feasible(f64),
    Infeasible,
    TimedOut,
}

#[derive(Debug, Default)]
struct SearchState {
    incumbent: Option<(Cycle, f64)>,
    probes: usize,
    oracle_calls: usize,
    timed_out: bool,
}

/// Largest second-smallest incident edge weight; 0 with fewer than three
/// nodes.
fn degree_lower_bound(graph: &Graph) -> f64 {
    if graph.num_nodes() < 3 {
        return 0.0;
    }
    graph
        .nodes()
        .filter_map(|u| {
            let mut weights: Vec<f64> = graph.neighbors(u).map(|(_, w)| w).collect();
            weights.sort_by(f64::total_cmp);
            weights.get(1).copied()
        })
        .fold(0.0, f64::max)
}
