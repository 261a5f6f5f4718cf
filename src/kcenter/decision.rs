//! SAT encoding of the k-center decision problem.

use crate::distance::DistanceOracle;
use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::sat::{Lit, SatOracle, VarTable, VarisatOracle};
use tracing::debug;

/// Encodes "at most `k` centers cover every node within `radius`".
///
/// One variable per node ("selected as center"), one global at-most-`k`
/// constraint, and for every node `u` the clause
/// `OR { x_v : dist(u, v) <= radius }`.
///
/// Single use: clauses are never retracted, so probing another radius
/// needs a new encoder.
#[derive(Debug)]
pub struct KCenterDecisionEncoder<'d, O: SatOracle = VarisatOracle> {
    distances: &'d DistanceOracle,
    k: usize,
    radius: f64,
    vars: VarTable<NodeId>,
    oracle: O,
    /// `None` until `solve()` ran; then the decoded answer.
    solution: Option<Option<Vec<NodeId>>>,
}

impl<'d> KCenterDecisionEncoder<'d, VarisatOracle> {
    /// Builds the encoding on a fresh [`VarisatOracle`].
    pub fn new(distances: &'d DistanceOracle, k: usize, radius: f64) -> Result<Self> {
        Self::with_oracle(distances, k, radius, VarisatOracle::new())
    }
}

impl<'d, O: SatOracle> KCenterDecisionEncoder<'d, O> {
    /// Builds the encoding on the given (empty) oracle.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `k` is zero or exceeds the node count, or the
    /// radius is negative or NaN.
    pub fn with_oracle(distances: &'d DistanceOracle, k: usize, radius: f64, mut oracle: O) -> Result<Self> {
        let n = distances.num_nodes();
        if k == 0 || k > n {
            return Err(Error::invalid(format!("k must be in 1..={n}, got {k}")));
        }
        if radius.is_nan() || radius < 0.0 {
            return Err(Error::invalid(format!("radius must be >= 0, got {radius}")));
        }

        let vars = VarTable::allocate(&mut oracle, distances.nodes());
        let all: Vec<Lit> = vars.iter().map(|(_, v)| v.positive()).collect();
        oracle.add_at_most_k(&all, k);

        let mut encoder = Self {
            distances,
            k,
            radius,
            vars,
            oracle,
            solution: None,
        };
        encoder.add_coverage_clauses();
        Ok(encoder)
    }

    fn add_coverage_clauses(&mut self) {
        for u in self.distances.nodes() {
            let clause: Vec<Lit> = self
                .distances
                .nodes_within_radius(u, self.radius)
                .filter_map(|v| self.vars.var(&v))
                .map(|v| v.positive())
                .collect();
            self.oracle.add_clause(&clause);
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Runs the oracle. Returns the selected centers, or `None` if no
    /// `k` centers cover every node within the radius.
    pub fn solve(&mut self) -> Result<Option<Vec<NodeId>>> {
        let sat = self.oracle.solve()?;
        let centers = if sat {
            self.oracle
                .model()
                .map(|model| self.vars.selected(&model).copied().collect::<Vec<_>>())
        } else {
            None
        };
        debug!(
            radius = self.radius,
            k = self.k,
            sat,
            clauses = self.oracle.stats().clauses,
            "k-center decision probe"
        );
        self.solution = Some(centers.clone());
        Ok(centers)
    }

    /// The answer of the last `solve()`.
    ///
    /// # Errors
    ///
    /// `NoSolutionYet` if `solve()` has not been called.
    pub fn solution(&self) -> Result<Option<&[NodeId]>> {
        match &self.solution {
            Some(answer) => Ok(answer.as_deref()),
            None => Err(Error::NoSolutionYet),
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}
