//! SAT-driven exact optimization on weighted graphs.
//!
//! Each optimization problem is reduced to a sequence of satisfiability
//! queries over a threshold (a covering radius, an edge-weight bound):
//!
//! - **k-center**: choose `k` nodes minimizing the largest shortest-path
//!   distance from any node to its nearest center. Bisects the distinct
//!   pairwise distances with a SAT decision encoding per radius.
//! - **Hamiltonian cycle**: degree-two SAT encoding with subtour
//!   elimination clauses added lazily by a cutting-plane loop.
//! - **Bottleneck TSP**: minimize the largest edge of a tour by probing
//!   edge-weight thresholds with the Hamiltonian cycle encoder.
//!
//! Supporting modules:
//!
//! - [`graph`]: undirected weighted graphs and seeded generators.
//! - [`distance`]: all-pairs shortest-path table.
//! - [`sat`]: the [`SatOracle`](sat::SatOracle) abstraction, the varisat
//!   backend, and a sequential-counter cardinality encoding.
//! - [`timer`]: wall-clock budgets checked between oracle calls.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for graphs, configs and results.
//! - `parallel`: build distance tables with rayon.

pub mod btsp;
pub mod distance;
mod error;
pub mod graph;
pub mod hamiltonian;
pub mod kcenter;
pub mod sat;
mod status;
pub mod timer;

pub use error::{Error, Result};
pub use status::SolveStatus;
