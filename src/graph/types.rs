//! Undirected weighted graph.

use crate::error::{Error, Result};

/// Node identifier. Nodes of a graph with `n` nodes are `0..n`.
pub type NodeId = usize;

/// Canonical key of an undirected edge: `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey(pub NodeId, pub NodeId);

impl EdgeKey {
    pub fn new(u: NodeId, v: NodeId) -> Self {
        if u <= v {
            EdgeKey(u, v)
        } else {
            EdgeKey(v, u)
        }
    }

    /// Whether `node` is one of the two endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.0 == node || self.1 == node
    }

    /// The endpoint opposite to `node`.
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.0 == node {
            self.1
        } else {
            self.0
        }
    }
}

/// A weighted undirected edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub key: EdgeKey,
    pub weight: f64,
}

/// An undirected graph with a fixed node set and weighted edges.
///
/// Edge weights must be finite. Negativity is checked by the consumers
/// that require nonnegative weights.
///
/// # Examples
///
/// ```
/// use u_satopt::graph::Graph;
///
/// let mut graph = Graph::new(3);
/// graph.add_edge(0, 1, 1.0).unwrap();
/// graph.add_edge(1, 2, 2.5).unwrap();
/// assert_eq!(graph.num_edges(), 2);
/// assert_eq!(graph.weight(2, 1), Some(2.5));
/// assert!(!graph.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    num_nodes: usize,
    edges: Vec<Edge>,
    /// Per node: (neighbor, index into `edges`).
    adjacency: Vec<Vec<(NodeId, usize)>>,
}

impl Graph {
    /// Creates a graph with nodes `0..num_nodes` and no edges.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); num_nodes],
        }
    }

    /// Builds a graph from an edge list.
    pub fn from_edges<I>(num_nodes: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut graph = Self::new(num_nodes);
        for (u, v, weight) in edges {
            graph.add_edge(u, v, weight)?;
        }
        Ok(graph)
    }

    /// Adds the undirected edge `{u, v}`. Re-adding an existing edge
    /// overwrites its weight.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f64) -> Result<()> {
        if u >= self.num_nodes || v >= self.num_nodes {
            return Err(Error::invalid(format!(
                "edge ({u}, {v}) references a node outside 0..{}",
                self.num_nodes
            )));
        }
        if u == v {
            return Err(Error::invalid(format!("self loop on node {u}")));
        }
        if !weight.is_finite() {
            return Err(Error::invalid(format!(
                "edge ({u}, {v}) has non-finite weight {weight}"
            )));
        }

        if let Some(idx) = self.edge_index(u, v) {
            self.edges[idx].weight = weight;
            return Ok(());
        }

        let idx = self.edges.len();
        self.edges.push(Edge {
            key: EdgeKey::new(u, v),
            weight,
        });
        self.adjacency[u].push((v, idx));
        self.adjacency[v].push((u, idx));
        Ok(())
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// All node ids in ascending order.
    pub fn nodes(&self) -> std::ops::Range<NodeId> {
        0..self.num_nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbors of `node` with the connecting edge weight.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency[node]
            .iter()
            .map(move |&(other, idx)| (other, self.edges[idx].weight))
    }

    /// Edges incident to `node`.
    pub fn incident_edges(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency[node].iter().map(move |&(_, idx)| &self.edges[idx])
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node].len()
    }

    /// Weight of edge `{u, v}`, if present.
    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.edge_index(u, v).map(|idx| self.edges[idx].weight)
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.edge_index(u, v).is_some()
    }

    /// Whether every pair of distinct nodes is joined by an edge.
    pub fn is_complete(&self) -> bool {
        let n = self.num_nodes;
        self.edges.len() == n * n.saturating_sub(1) / 2
    }

    /// Returns the first negative edge, if any.
    pub fn find_negative_edge(&self) -> Option<&Edge> {
        self.edges.iter().find(|e| e.weight < 0.0)
    }

    /// Subgraph on the same node set keeping only edges accepted by `keep`.
    pub fn filter_edges<F>(&self, mut keep: F) -> Graph
    where
        F: FnMut(&Edge) -> bool,
    {
        let mut sub = Graph::new(self.num_nodes);
        for edge in self.edges.iter().filter(|e| keep(e)) {
            let idx = sub.edges.len();
            sub.edges.push(*edge);
            sub.adjacency[edge.key.0].push((edge.key.1, idx));
            sub.adjacency[edge.key.1].push((edge.key.0, idx));
        }
        sub
    }

    fn edge_index(&self, u: NodeId, v: NodeId) -> Option<usize> {
        let (a, b) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        self.adjacency[a]
            .iter()
            .find(|&&(other, _)| other == b)
            .map(|&(_, idx)| idx)
    }
}
