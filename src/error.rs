//! Crate-wide error type.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by graph construction, encoders and solvers.
///
/// Infeasibility is not an error: an UNSAT oracle answer surfaces as
/// `None` or [`SolveStatus::Infeasible`](crate::SolveStatus::Infeasible).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An input violated a documented precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A result accessor was called before `solve()`.
    #[error("no solution available: call `solve` first")]
    NoSolutionYet,

    /// The SAT backend failed internally.
    #[error("SAT oracle failure: {0}")]
    Oracle(String),

    /// A violation finder rejected a model without producing a cut.
    #[error("cutting-plane loop made no progress: model rejected without new clauses")]
    NoProgress,
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}
