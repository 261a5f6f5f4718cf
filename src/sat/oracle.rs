//! Decision-oracle interface consumed by the encoders.

use super::cardinality::encode_at_most_k;
use super::types::{CardinalityConstraint, Comparison, Lit, Model, Var};
use crate::error::Result;

/// Counters kept by an oracle instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OracleStats {
    /// Variables allocated, auxiliary ones included.
    pub vars: usize,
    /// Clauses added, cardinality encodings included.
    pub clauses: usize,
    /// Completed `solve()` calls.
    pub solve_calls: usize,
}

/// An incremental CNF solver used as a SAT/UNSAT decision oracle.
///
/// Clauses are only ever accumulated. A `solve()` call is atomic: it
/// cannot be interrupted, and its answer is authoritative.
///
/// Implementors provide variable allocation, clause addition, solving and
/// model retrieval. Cardinality constraints have a default CNF encoding
/// that implementors with native support may override.
pub trait SatOracle {
    /// Allocates a fresh variable, distinct from every earlier one.
    fn new_var(&mut self) -> Var;

    /// Number of variables allocated so far.
    fn num_vars(&self) -> usize;

    /// Adds a clause. The empty clause makes the instance UNSAT.
    fn add_clause(&mut self, clause: &[Lit]);

    /// Adds `sum(lits) <= k`.
    fn add_at_most_k(&mut self, lits: &[Lit], k: usize) {
        encode_at_most_k(self, lits, k);
    }

    /// Adds a cardinality constraint. `>= k` over `n` literals becomes
    /// `<= n - k` over their negations; `k > n` is unsatisfiable.
    fn add_cardinality(&mut self, constraint: &CardinalityConstraint) {
        match constraint.comparison {
            Comparison::AtMost => self.add_at_most_k(&constraint.lits, constraint.bound),
            Comparison::AtLeast => {
                let n = constraint.lits.len();
                if constraint.bound > n {
                    self.add_clause(&[]);
                    return;
                }
                let negated: Vec<Lit> = constraint.lits.iter().map(|&l| !l).collect();
                self.add_at_most_k(&negated, n - constraint.bound);
            }
        }
    }

    /// Decides satisfiability of all clauses added so far.
    fn solve(&mut self) -> Result<bool>;

    /// Model of the last `solve()` if it answered SAT.
    fn model(&self) -> Option<Model>;

    fn stats(&self) -> OracleStats;
}
