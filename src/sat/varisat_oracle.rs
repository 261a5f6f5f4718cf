//! [`SatOracle`] backed by the `varisat` CDCL solver.

use super::oracle::{OracleStats, SatOracle};
use super::types::{Lit, Model, Var};
use crate::error::{Error, Result};
use varisat::ExtendFormula;

/// Incremental oracle on top of `varisat::Solver`.
///
/// Variables are allocated locally so that encoder ids and auxiliary
/// cardinality registers never collide; the backend learns about a
/// variable the first time a clause mentions it.
pub struct VarisatOracle {
    solver: varisat::Solver<'static>,
    stats: OracleStats,
    /// Set once the empty clause is added.
    contradiction: bool,
    model: Option<Model>,
}

impl VarisatOracle {
    pub fn new() -> Self {
        Self {
            solver: varisat::Solver::new(),
            stats: OracleStats::default(),
            contradiction: false,
            model: None,
        }
    }
}

impl Default for VarisatOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VarisatOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VarisatOracle")
            .field("stats", &self.stats)
            .field("contradiction", &self.contradiction)
            .finish_non_exhaustive()
    }
}

impl SatOracle for VarisatOracle {
    fn new_var(&mut self) -> Var {
        self.stats.vars += 1;
        Var::new(self.stats.vars as u32)
    }

    fn num_vars(&self) -> usize {
        self.stats.vars
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        self.stats.clauses += 1;
        self.model = None;
        if clause.is_empty() {
            self.contradiction = true;
            return;
        }
        let lits: Vec<varisat::Lit> = clause
            .iter()
            .map(|l| varisat::Lit::from_dimacs(l.to_dimacs() as isize))
            .collect();
        self.solver.add_clause(&lits);
    }

    fn solve(&mut self) -> Result<bool> {
        self.stats.solve_calls += 1;
        self.model = None;
        if self.contradiction {
            return Ok(false);
        }

        let sat = self
            .solver
            .solve()
            .map_err(|e| Error::Oracle(e.to_string()))?;
        if sat {
            let assignment = self.solver.model().unwrap_or_default();
            let literals = assignment
                .into_iter()
                .map(|l| Lit::from_dimacs(l.to_dimacs() as i32));
            self.model = Some(Model::from_literals(self.stats.vars, literals));
        }
        Ok(sat)
    }

    fn model(&self) -> Option<Model> {
        self.model.clone()
    }

    fn stats(&self) -> OracleStats {
        self.stats
    }
}
