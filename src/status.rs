//! Outcome status of the optimizing solvers.

/// Status of a solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Solution found, but the time budget ran out before optimality was proven.
    Feasible,
    /// The oracle proved that no solution exists.
    Infeasible,
    /// The time budget ran out before any solution was found.
    Timeout,
}

impl SolveStatus {
    /// Whether a solution accompanies this status.
    pub fn is_solution_found(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }

    /// Whether the result is proven: optimal, or proven infeasible.
    pub fn is_proven(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Infeasible)
    }
}
