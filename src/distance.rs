//! All-pairs shortest-path distance table.
//!
//! [`DistanceOracle`] runs Dijkstra from every node once and answers the
//! distance, coverage and radius queries the k-center solver needs. The
//! table is immutable after construction and can be shared read-only
//! (e.g. behind an `Arc`) across solver instances.

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Precomputed shortest-path distances.
///
/// Unreachable pairs have distance `f64::INFINITY`. The table is symmetric,
/// zero on the diagonal, and satisfies the triangle inequality.
///
/// # Examples
///
/// ```
/// use u_satopt::distance::DistanceOracle;
/// use u_satopt::graph::Graph;
///
/// let graph = Graph::from_edges(3, [(0, 1, 1.0), (1, 2, 2.0)]).unwrap();
/// let distances = DistanceOracle::build(&graph).unwrap();
/// assert_eq!(distances.dist(0, 2), 3.0);
/// assert_eq!(distances.max_nearest_distance(&[1]).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceOracle {
    num_nodes: usize,
    /// Row-major `num_nodes x num_nodes`.
    table: Vec<f64>,
}

impl DistanceOracle {
    /// Computes all-pairs shortest paths.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the graph has no nodes or a negative edge weight.
    pub fn build(graph: &Graph) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::invalid("graph has no nodes"));
        }
        if let Some(edge) = graph.find_negative_edge() {
            return Err(Error::invalid(format!(
                "edge ({}, {}) has negative weight {}",
                edge.key.0, edge.key.1, edge.weight
            )));
        }

        let n = graph.num_nodes();
        let rows = shortest_path_rows(graph);
        let mut table = Vec::with_capacity(n * n);
        for row in rows {
            table.extend(row);
        }
        debug!(nodes = n, edges = graph.num_edges(), "built distance table");

        Ok(Self {
            num_nodes: n,
            table,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// All node ids in ascending order.
    pub fn nodes(&self) -> std::ops::Range<NodeId> {
        0..self.num_nodes
    }

    /// Shortest-path distance, `INFINITY` if disconnected.
    ///
    /// # Panics
    ///
    /// Panics if either node is out of range.
    pub fn dist(&self, u: NodeId, v: NodeId) -> f64 {
        self.table[u * self.num_nodes + v]
    }

    /// Nodes `v` with `dist(u, v) <= radius`, including `u` itself for any
    /// `radius >= 0`.
    pub fn nodes_within_radius(&self, u: NodeId, radius: f64) -> impl Iterator<Item = NodeId> + '_ {
        let row = &self.table[u * self.num_nodes..(u + 1) * self.num_nodes];
        row.iter()
            .enumerate()
            .filter(move |&(_, &d)| d <= radius)
            .map(|(v, _)| v)
    }

    /// Covering radius of `centers`: the largest distance from any node to
    /// its nearest center.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `centers` is empty or references an unknown node.
    pub fn max_nearest_distance(&self, centers: &[NodeId]) -> Result<f64> {
        if centers.is_empty() {
            return Err(Error::invalid("center set is empty"));
        }
        if let Some(&bad) = centers.iter().find(|&&c| c >= self.num_nodes) {
            return Err(Error::invalid(format!("center {bad} is not a node")));
        }

        let radius = self
            .nodes()
            .map(|u| {
                centers
                    .iter()
                    .map(|&c| self.dist(c, u))
                    .fold(f64::INFINITY, f64::min)
            })
            .fold(0.0, f64::max);
        Ok(radius)
    }

    /// Ascending distinct finite pairwise distances, the diagonal's zero
    /// included. The optimal k-center radius is always one of these.
    pub fn sorted_distinct_distances(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .table
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }
}

#[cfg(feature = "parallel")]
fn shortest_path_rows(graph: &Graph) -> Vec<Vec<f64>> {
    use rayon::prelude::*;
    (0..graph.num_nodes())
        .into_par_iter()
        .map(|source| dijkstra(graph, source))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn shortest_path_rows(graph: &Graph) -> Vec<Vec<f64>> {
    graph.nodes().map(|source| dijkstra(graph, source)).collect()
}

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Single-source shortest paths; weights must be nonnegative.
fn dijkstra(graph: &Graph, source: NodeId) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; graph.num_nodes()];
    let mut heap = BinaryHeap::new();
    dist[source] = 0.0;
    heap.push(Frontier {
        dist: 0.0,
        node: source,
    });

    while let Some(Frontier { dist: d, node }) = heap.pop() {
        if d > dist[node] {
            continue;
        }
        for (next, weight) in graph.neighbors(node) {
            let candidate = d + weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                heap.push(Frontier {
                    dist: candidate,
                    node: next,
                });
            }
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generators;
    use proptest::prelude::*;

    fn path_graph() -> Graph {
        // 0 -1- 1 -2- 2 -4- 3, plus a shortcut 0 -5- 3 that is not shortest
        Graph::from_edges(4, [(0, 1, 1.0), (1, 2, 2.0), (2, 3, 4.0), (0, 3, 5.0)]).unwrap()
    }

    #[test]
    fn test_dist_symmetric_and_zero_diagonal() {
        let d = DistanceOracle::build(&path_graph()).unwrap();
        for u in d.nodes() {
            assert_eq!(d.dist(u, u), 0.0);
            for v in d.nodes() {
                assert_eq!(d.dist(u, v), d.dist(v, u));
            }
        }
        assert_eq!(d.dist(0, 2), 3.0);
        assert_eq!(d.dist(0, 3), 5.0);
        assert_eq!(d.dist(1, 3), 6.0);
    }

    #[test]
    fn test_disconnected_is_infinite() {
        let g = Graph::from_edges(3, [(0, 1, 1.0)]).unwrap();
        let d = DistanceOracle::build(&g).unwrap();
        assert!(d.dist(0, 2).is_infinite());
        assert_eq!(d.max_nearest_distance(&[0]).unwrap(), f64::INFINITY);
        assert_eq!(d.max_nearest_distance(&[0, 2]).unwrap(), 1.0);
    }

    #[test]
    fn test_rejects_negative_weight_and_empty_graph() {
        let g = Graph::from_edges(2, [(0, 1, -1.0)]).unwrap();
        assert!(matches!(
            DistanceOracle::build(&g),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            DistanceOracle::build(&Graph::new(0)),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_nodes_within_radius_includes_self() {
        let d = DistanceOracle::build(&path_graph()).unwrap();
        assert_eq!(d.nodes_within_radius(0, 0.0).collect::<Vec<_>>(), vec![0]);
        assert_eq!(d.nodes_within_radius(1, 2.0).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(d.nodes_within_radius(3, 100.0).count(), 4);
    }

    #[test]
    fn test_max_nearest_distance() {
        let d = DistanceOracle::build(&path_graph()).unwrap();
        assert_eq!(d.max_nearest_distance(&[1]).unwrap(), 6.0);
        assert_eq!(d.max_nearest_distance(&[1, 3]).unwrap(), 2.0);
        assert_eq!(d.max_nearest_distance(&[0, 1, 2, 3]).unwrap(), 0.0);
        assert!(matches!(
            d.max_nearest_distance(&[]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            d.max_nearest_distance(&[9]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sorted_distinct_distances() {
        let d = DistanceOracle::build(&path_graph()).unwrap();
        assert_eq!(
            d.sorted_distinct_distances(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn test_sorted_distances_skip_infinity() {
        let g = Graph::from_edges(4, [(0, 1, 2.0), (2, 3, 2.0)]).unwrap();
        let d = DistanceOracle::build(&g).unwrap();
        assert_eq!(d.sorted_distinct_distances(), vec![0.0, 2.0]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_triangle_inequality(n in 2usize..9, p in 0.2f64..1.0, seed in any::<u64>()) {
            let g = generators::random_gnp(n, p, 20, seed);
            let d = DistanceOracle::build(&g).unwrap();
            for u in d.nodes() {
                for v in d.nodes() {
                    for w in d.nodes() {
                        prop_assert!(d.dist(u, w) <= d.dist(u, v) + d.dist(v, w) + 1e-9);
                    }
                }
            }
        }

        #[test]
        fn prop_covering_radius_non_increasing(n in 2usize..9, seed in any::<u64>()) {
            let g = generators::random_gnp(n, 0.6, 20, seed);
            let d = DistanceOracle::build(&g).unwrap();
            let mut centers = Vec::new();
            let mut previous = f64::INFINITY;
            for c in d.nodes() {
                centers.push(c);
                let radius = d.max_nearest_distance(&centers).unwrap();
                prop_assert!(radius >= 0.0);
                prop_assert!(radius <= previous);
                previous = radius;
            }
            prop_assert_eq!(previous, 0.0);
        }
    }
}
