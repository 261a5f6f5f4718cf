//! Lazy constraint generation on top of a [`SatOracle`].
//!
//! A relaxed formulation is solved; a [`ViolationFinder`] inspects the
//! model and either accepts it or returns clauses cutting it off. The cuts
//! are added to the same oracle instance and the loop re-solves. Every cut
//! excludes the inspected model, so on a finite space the loop terminates.

use crate::error::{Error, Result};
use crate::sat::{Clause, Model, SatOracle};
use crate::timer::Timer;
use tracing::debug;

/// Verdict of a [`ViolationFinder`] on one model.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection<S> {
    /// The model satisfies every lazy constraint.
    Accept(S),
    /// Clauses violated by the model, to be added before re-solving.
    Cut(Vec<Clause>),
}

/// Inspects models of a relaxation and yields violated constraints.
pub trait ViolationFinder {
    type Solution;

    /// Inspects `model`; `None` stands for the all-false assignment used
    /// before the first oracle call.
    fn inspect(&mut self, model: Option<&Model>) -> Inspection<Self::Solution>;
}

/// How a cutting-plane run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CuttingPlaneOutcome<S> {
    Accepted(S),
    /// The relaxation plus cuts is UNSAT.
    Infeasible,
    /// The time budget ran out between two oracle calls.
    Interrupted,
}

/// Counters of a cutting-plane run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CuttingPlaneStats {
    /// Models inspected.
    pub rounds: usize,
    /// Clauses added by the finder.
    pub cuts: usize,
    /// Oracle `solve()` calls.
    pub oracle_calls: usize,
}

/// Explicit refinement loop: inspect, cut, re-solve.
#[derive(Debug, Clone)]
pub struct CuttingPlaneLoop {
    timer: Timer,
    stats: CuttingPlaneStats,
}

impl CuttingPlaneLoop {
    pub fn new(timer: Timer) -> Self {
        Self {
            timer,
            stats: CuttingPlaneStats::default(),
        }
    }

    pub fn stats(&self) -> CuttingPlaneStats {
        self.stats
    }

    /// Runs until the finder accepts, the oracle answers UNSAT, or the
    /// budget expires.
    ///
    /// # Errors
    ///
    /// `NoProgress` if the finder rejects a model without cuts; oracle
    /// failures are propagated.
    pub fn run<O, F>(&mut self, oracle: &mut O, finder: &mut F) -> Result<CuttingPlaneOutcome<F::Solution>>
    where
        O: SatOracle + ?Sized,
        F: ViolationFinder,
    {
        let mut model: Option<Model> = None;
        loop {
            self.stats.rounds += 1;
            match finder.inspect(model.as_ref()) {
                Inspection::Accept(solution) => return Ok(CuttingPlaneOutcome::Accepted(solution)),
                Inspection::Cut(clauses) => {
                    if clauses.is_empty() {
                        return Err(Error::NoProgress);
                    }
                    debug!(round = self.stats.rounds, cuts = clauses.len(), "adding lazy constraints");
                    self.stats.cuts += clauses.len();
                    for clause in &clauses {
                        oracle.add_clause(clause);
                    }
                }
            }

            if self.timer.is_expired() {
                return Ok(CuttingPlaneOutcome::Interrupted);
            }
            self.stats.oracle_calls += 1;
            if !oracle.solve()? {
                return Ok(CuttingPlaneOutcome::Infeasible);
            }
            model = oracle.model();
            if model.is_none() {
                return Err(Error::Oracle("SAT answer without a model".into()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::{Lit, Var, VarisatOracle};

    /// Accepts only assignments whose true variables number exactly `target`,
    /// cutting each rejected model with a blocking clause.
    struct Exactly {
        vars: Vec<Var>,
        target: usize,
    }

    impl ViolationFinder for Exactly {
        type Solution = Vec<bool>;

        fn inspect(&mut self, model: Option<&Model>) -> Inspection<Vec<bool>> {
            let values: Vec<bool> = self
                .vars
                .iter()
                .map(|&v| model.is_some_and(|m| m.value(v)))
                .collect();
            if values.iter().filter(|&&b| b).count() == self.target {
                return Inspection::Accept(values);
            }
            let blocking: Vec<Lit> = self
                .vars
                .iter()
                .zip(&values)
                .map(|(v, &b)| if b { v.negative() } else { v.positive() })
                .collect();
            Inspection::Cut(vec![blocking])
        }
    }

    struct Stubborn;

    impl ViolationFinder for Stubborn {
        type Solution = ();

        fn inspect(&mut self, _model: Option<&Model>) -> Inspection<()> {
            Inspection::Cut(Vec::new())
        }
    }

    #[test]
    fn test_loop_accepts_after_cuts() {
        let mut oracle = VarisatOracle::new();
        let vars: Vec<Var> = (0..3).map(|_| oracle.new_var()).collect();
        let mut finder = Exactly { vars, target: 2 };
        let mut cp = CuttingPlaneLoop::new(Timer::unlimited());
        match cp.run(&mut oracle, &mut finder).unwrap() {
            CuttingPlaneOutcome::Accepted(values) => {
                assert_eq!(values.iter().filter(|&&b| b).count(), 2)
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(cp.stats().cuts >= 1);
        assert_eq!(cp.stats().rounds, cp.stats().oracle_calls + 1);
    }

    #[test]
    fn test_loop_reports_infeasible() {
        let mut oracle = VarisatOracle::new();
        let vars: Vec<Var> = (0..2).map(|_| oracle.new_var()).collect();
        let mut finder = Exactly { vars, target: 3 };
        let mut cp = CuttingPlaneLoop::new(Timer::unlimited());
        assert_eq!(
            cp.run(&mut oracle, &mut finder).unwrap(),
            CuttingPlaneOutcome::Infeasible
        );
        // All four assignments get blocked.
        assert_eq!(cp.stats().cuts, 4);
    }

    #[test]
    fn test_empty_cut_is_no_progress() {
        let mut oracle = VarisatOracle::new();
        let mut cp = CuttingPlaneLoop::new(Timer::unlimited());
        assert_eq!(cp.run(&mut oracle, &mut Stubborn), Err(Error::NoProgress));
    }

    #[test]
    fn test_expired_budget_interrupts() {
        let mut oracle = VarisatOracle::new();
        let vars: Vec<Var> = (0..2).map(|_| oracle.new_var()).collect();
        let mut finder = Exactly { vars, target: 1 };
        let mut cp = CuttingPlaneLoop::new(Timer::new(Some(std::time::Duration::ZERO)));
        assert_eq!(
            cp.run(&mut oracle, &mut finder).unwrap(),
            CuttingPlaneOutcome::Interrupted
        );
        assert_eq!(cp.stats().oracle_calls, 0);
    }
}
