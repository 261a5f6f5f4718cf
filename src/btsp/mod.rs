//! Bottleneck Traveling Salesman Problem (BTSP).
//!
//! Find a Hamiltonian tour of a complete weighted graph minimizing its
//! largest edge weight. The optimum is always one of the edge weights, so
//! the solver searches over weight thresholds and uses the Hamiltonian
//! cycle encoder as a feasibility oracle on each threshold subgraph.

mod config;
mod runner;

pub use config::{BtspConfig, SearchStrategy};
pub use runner::{BottleneckTspSolver, BtspResult};
