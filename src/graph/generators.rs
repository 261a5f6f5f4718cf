//! Graph generators for tests, benchmarks and experiments.

use super::types::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The cycle `0 - 1 - ... - (n-1) - 0`, all edges weighted `weight`.
///
/// For `n < 3` the result is a path (no multi-edges, no self loops).
pub fn cycle(n: usize, weight: f64) -> Graph {
    let mut graph = Graph::new(n);
    for u in 0..n {
        let v = (u + 1) % n;
        if u != v && !graph.has_edge(u, v) {
            push(&mut graph, u, v, weight);
        }
    }
    graph
}

/// The complete graph on `n` nodes, all edges weighted `weight`.
pub fn complete(n: usize, weight: f64) -> Graph {
    let mut graph = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            push(&mut graph, u, v, weight);
        }
    }
    graph
}

/// Complete graph over `n` uniform points in the unit square, weighted by
/// Euclidean distance.
pub fn random_euclidean(n: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .collect();

    let mut graph = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            let (dx, dy) = (points[u].0 - points[v].0, points[u].1 - points[v].1);
            push(&mut graph, u, v, (dx * dx + dy * dy).sqrt());
        }
    }
    graph
}

/// Erdős–Rényi `G(n, p)` with integer weights in `1..=max_weight`.
pub fn random_gnp(n: usize, p: f64, max_weight: u32, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let p = p.clamp(0.0, 1.0);
    let max_weight = max_weight.max(1);

    let mut graph = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random_bool(p) {
                let weight = rng.random_range(1..=max_weight) as f64;
                push(&mut graph, u, v, weight);
            }
        }
    }
    graph
}

// Generated edges are valid by construction.
fn push(graph: &mut Graph, u: usize, v: usize, weight: f64) {
    if graph.add_edge(u, v, weight).is_err() {
        unreachable!("generator produced an invalid edge ({u}, {v}, {weight})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        let g = cycle(5, 2.0);
        assert_eq!(g.num_edges(), 5);
        assert!(g.nodes().all(|u| g.degree(u) == 2));
        assert_eq!(g.weight(4, 0), Some(2.0));
    }

    #[test]
    fn test_small_cycles_degenerate_to_paths() {
        assert_eq!(cycle(1, 1.0).num_edges(), 0);
        assert_eq!(cycle(2, 1.0).num_edges(), 1);
    }

    #[test]
    fn test_complete() {
        let g = complete(6, 3.0);
        assert!(g.is_complete());
        assert_eq!(g.num_edges(), 15);
    }

    #[test]
    fn test_random_euclidean_is_seeded() {
        let a = random_euclidean(8, 7);
        let b = random_euclidean(8, 7);
        assert_eq!(a, b);
        assert!(a.is_complete());
        assert!(a.edges().iter().all(|e| e.weight >= 0.0 && e.weight <= 2f64.sqrt()));
    }

    #[test]
    fn test_random_gnp_extremes() {
        assert_eq!(random_gnp(6, 0.0, 10, 1).num_edges(), 0);
        let full = random_gnp(6, 1.0, 10, 1);
        assert!(full.is_complete());
        assert!(full
            .edges()
            .iter()
            .all(|e| (1.0..=10.0).contains(&e.weight) && e.weight.fract() == 0.0));
    }
}
