//! Weighted undirected graphs.
//!
//! Graph construction is deliberately minimal: nodes are the dense ids
//! `0..n`, edges carry a finite weight, and [`Graph::filter_edges`] derives
//! the threshold subgraphs used by the bottleneck solver.

pub mod generators;
mod types;

pub use types::{Edge, EdgeKey, Graph, NodeId};
