//! Boolean satisfiability layer.
//!
//! Encoders talk to a SAT solver only through the [`SatOracle`] capability
//! trait (add clause, add cardinality, solve, read model), so they stay
//! solver-agnostic. [`VarisatOracle`] is the default implementation.
//!
//! # Key Components
//!
//! - [`Var`], [`Lit`], [`Model`]: DIMACS-style variables, literals and assignments
//! - [`CardinalityConstraint`]: at-most / at-least bounds over literals
//! - [`SatOracle`]: incremental decision-oracle interface
//! - [`VarTable`]: per-encoder domain-object to variable bijection
//! - [`encode_at_most_k`]: sequential-counter CNF encoding

mod cardinality;
mod oracle;
mod types;
mod var_table;
mod varisat_oracle;

pub use cardinality::encode_at_most_k;
pub use oracle::{OracleStats, SatOracle};
pub use types::{CardinalityConstraint, Clause, Comparison, Lit, Model, Var};
pub use var_table::VarTable;
pub use varisat_oracle::VarisatOracle;
