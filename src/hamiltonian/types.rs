//! Hamiltonian cycle representation.

use crate::graph::{EdgeKey, Graph, NodeId};
use std::collections::HashMap;

/// A set of edges forming a closed tour, stored in ascending key order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cycle {
    edges: Vec<EdgeKey>,
}

impl Cycle {
    pub fn from_edges(mut edges: Vec<EdgeKey>) -> Self {
        edges.sort_unstable();
        edges.dedup();
        Self { edges }
    }

    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Nodes in visiting order, starting at the smallest node and leaving
    /// through its smaller neighbor. The walk stops early if the edges do
    /// not form a closed tour.
    pub fn tour(&self) -> Vec<NodeId> {
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for key in &self.edges {
            adjacency.entry(key.0).or_default().push(key.1);
            adjacency.entry(key.1).or_default().push(key.0);
        }
        let Some(&start) = adjacency.keys().min() else {
            return Vec::new();
        };

        let mut order = vec![start];
        let mut prev = start;
        let mut current = adjacency[&start].iter().copied().min().unwrap_or(start);
        while current != start && order.len() <= self.edges.len() {
            order.push(current);
            let Some(next) = adjacency[&current].iter().copied().find(|&v| v != prev) else {
                break;
            };
            prev = current;
            current = next;
        }
        order
    }

    /// Largest edge weight along the cycle, `None` if an edge is missing
    /// from `graph` or the cycle is empty.
    pub fn bottleneck(&self, graph: &Graph) -> Option<f64> {
        self.edges
            .iter()
            .map(|key| graph.weight(key.0, key.1))
            .try_fold(None, |acc: Option<f64>, w| {
                let w = w?;
                Some(Some(acc.map_or(w, |a| a.max(w))))
            })
            .flatten()
    }

    /// Whether this is a Hamiltonian cycle of `graph`: `|V|` graph edges,
    /// every node of degree two, one single tour.
    pub fn is_hamiltonian_in(&self, graph: &Graph) -> bool {
        let n = graph.num_nodes();
        if n < 3 || self.edges.len() != n {
            return false;
        }
        if !self.edges.iter().all(|k| k.1 < n && graph.has_edge(k.0, k.1)) {
            return false;
        }
        let mut degree = vec![0usize; n];
        for key in &self.edges {
            degree[key.0] += 1;
            degree[key.1] += 1;
        }
        degree.iter().all(|&d| d == 2) && self.tour().len() == n
    }
}
