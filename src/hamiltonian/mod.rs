//! Hamiltonian cycle by SAT with lazy subtour elimination.
//!
//! The degree-two relaxation admits any 2-factor (disjoint union of cycles
//! covering all nodes). Enumerating every subtour-elimination clause up
//! front is exponential, so [`HamiltonianCycleEncoder`] adds them on demand
//! through a [`CuttingPlaneLoop`]: each observed subtour gets one clause
//! requiring a selected edge across its boundary.
//!
//! The loop itself is generic: any [`ViolationFinder`] can drive it.
//!
//! # References
//!
//! Dantzig, Fulkerson & Johnson (1954), "Solution of a Large-Scale
//! Traveling-Salesman Problem", *Operations Research* 2(4), 393-410.

mod cutting_plane;
mod encoder;
mod types;

pub use cutting_plane::{
    CuttingPlaneLoop, CuttingPlaneOutcome, CuttingPlaneStats, Inspection, ViolationFinder,
};
pub use encoder::{CycleSearch, HamiltonianCycleEncoder};
pub use types::Cycle;
