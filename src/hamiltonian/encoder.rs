//! SAT encoding of the Hamiltonian cycle problem with lazy subtour
//! elimination.

use super::cutting_plane::{
    CuttingPlaneLoop, CuttingPlaneOutcome, CuttingPlaneStats, Inspection, ViolationFinder,
};
use super::types::Cycle;
use crate::error::{Error, Result};
use crate::graph::{EdgeKey, Graph, NodeId};
use crate::sat::{Clause, Lit, Model, SatOracle, VarTable, VarisatOracle};
use crate::timer::Timer;
use std::collections::HashSet;
use tracing::debug;

/// Outcome of a budgeted Hamiltonian cycle search.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleSearch {
    Found(Cycle),
    /// Proven: the graph has no Hamiltonian cycle.
    NoCycle,
    /// The time budget expired before an answer.
    TimedOut,
}

/// Encodes "the graph has a Hamiltonian cycle".
///
/// One variable per undirected edge ("selected"). For every node with
/// incident edges `E(u)`: at most 2 of `E(u)` and at most `|E(u)| - 2` of
/// their negations, so every node has degree exactly two and any model is
/// a 2-factor. Subtour-elimination clauses are generated lazily, only for
/// subtours the oracle actually produces.
///
/// # Examples
///
/// ```
/// use u_satopt::graph::generators;
/// use u_satopt::hamiltonian::HamiltonianCycleEncoder;
///
/// let graph = generators::cycle(5, 1.0);
/// let mut encoder = HamiltonianCycleEncoder::new(&graph).unwrap();
/// let cycle = encoder.solve().unwrap().expect("a cycle graph is Hamiltonian");
/// assert_eq!(cycle.len(), 5);
/// ```
#[derive(Debug)]
pub struct HamiltonianCycleEncoder<'g, O: SatOracle = VarisatOracle> {
    graph: &'g Graph,
    vars: VarTable<EdgeKey>,
    oracle: O,
    stats: CuttingPlaneStats,
    outcome: Option<CycleSearch>,
}

impl<'g> HamiltonianCycleEncoder<'g, VarisatOracle> {
    /// Builds the degree constraints on a fresh [`VarisatOracle`].
    pub fn new(graph: &'g Graph) -> Result<Self> {
        Self::with_oracle(graph, VarisatOracle::new())
    }
}

impl<'g, O: SatOracle> HamiltonianCycleEncoder<'g, O> {
    /// Builds the degree constraints on the given (empty) oracle.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the graph has no nodes.
    pub fn with_oracle(graph: &'g Graph, mut oracle: O) -> Result<Self> {
        if graph.is_empty() {
            return Err(Error::invalid("graph has no nodes"));
        }

        let vars = VarTable::allocate(&mut oracle, graph.edges().iter().map(|e| e.key));
        for node in graph.nodes() {
            let incident: Vec<Lit> = graph
                .incident_edges(node)
                .filter_map(|e| vars.var(&e.key))
                .map(|v| v.positive())
                .collect();
            let degree = incident.len();
            if degree < 2 {
                debug!(node, degree, "node cannot have degree two");
                oracle.add_clause(&[]);
                continue;
            }
            oracle.add_at_most_k(&incident, 2);
            let negated: Vec<Lit> = incident.iter().map(|&l| !l).collect();
            oracle.add_at_most_k(&negated, degree - 2);
        }

        Ok(Self {
            graph,
            vars,
            oracle,
            stats: CuttingPlaneStats::default(),
            outcome: None,
        })
    }

    /// Searches for a Hamiltonian cycle without a time budget.
    ///
    /// Returns `None` if the graph has none.
    pub fn solve(&mut self) -> Result<Option<Cycle>> {
        match self.solve_within(Timer::unlimited())? {
            CycleSearch::Found(cycle) => Ok(Some(cycle)),
            CycleSearch::NoCycle | CycleSearch::TimedOut => Ok(None),
        }
    }

    /// Searches for a Hamiltonian cycle, giving up between oracle calls
    /// once `timer` expires. A definitive answer is cached; a timed-out
    /// search resumes with the cuts gathered so far.
    pub fn solve_within(&mut self, timer: Timer) -> Result<CycleSearch> {
        if let Some(done) = self.outcome.as_ref().filter(|o| **o != CycleSearch::TimedOut) {
            return Ok(done.clone());
        }

        let mut finder = SubtourFinder {
            graph: self.graph,
            vars: &self.vars,
        };
        let mut cutting_planes = CuttingPlaneLoop::new(timer);
        let outcome = cutting_planes.run(&mut self.oracle, &mut finder);

        let run = cutting_planes.stats();
        self.stats.rounds += run.rounds;
        self.stats.cuts += run.cuts;
        self.stats.oracle_calls += run.oracle_calls;

        let search = match outcome? {
            CuttingPlaneOutcome::Accepted(cycle) => CycleSearch::Found(cycle),
            CuttingPlaneOutcome::Infeasible => CycleSearch::NoCycle,
            CuttingPlaneOutcome::Interrupted => CycleSearch::TimedOut,
        };
        debug!(
            nodes = self.graph.num_nodes(),
            edges = self.graph.num_edges(),
            rounds = self.stats.rounds,
            cuts = self.stats.cuts,
            found = matches!(search, CycleSearch::Found(_)),
            "hamiltonian cycle search finished"
        );
        self.outcome = Some(search.clone());
        Ok(search)
    }

    /// Cutting-plane counters accumulated over all solve calls.
    pub fn stats(&self) -> CuttingPlaneStats {
        self.stats
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

/// Finds the connected components of the selected edges and, for each
/// component that is not the whole graph, demands one selected edge across
/// its boundary.
struct SubtourFinder<'a> {
    graph: &'a Graph,
    vars: &'a VarTable<EdgeKey>,
}

impl ViolationFinder for SubtourFinder<'_> {
    type Solution = Cycle;

    fn inspect(&mut self, model: Option<&Model>) -> Inspection<Cycle> {
        let n = self.graph.num_nodes();
        let selected: Vec<EdgeKey> = match model {
            Some(model) => self.vars.selected(model).copied().collect(),
            None => Vec::new(),
        };

        let (labels, count) = component_labels(n, &selected);
        if count == 1 && selected.len() == n {
            return Inspection::Accept(Cycle::from_edges(selected));
        }

        let mut seen: HashSet<Clause> = HashSet::new();
        let mut cuts = Vec::new();
        if count > 1 {
            for component in 0..count {
                let inside = |u: NodeId| labels[u] == component;
                let mut clause: Clause = self
                    .graph
                    .edges()
                    .iter()
                    .filter(|e| inside(e.key.0) != inside(e.key.1))
                    .filter_map(|e| self.vars.var(&e.key))
                    .map(|v| v.positive())
                    .collect();
                clause.sort_unstable();
                if seen.insert(clause.clone()) {
                    cuts.push(clause);
                }
            }
        } else {
            // Spanning but not a tour (only without degree constraints,
            // e.g. a single node): forbid this exact selection.
            cuts.push(self.no_good(&selected));
        }
        debug!(components = count, cuts = cuts.len(), "subtours found");
        Inspection::Cut(cuts)
    }
}

impl SubtourFinder<'_> {
    fn no_good(&self, selected: &[EdgeKey]) -> Clause {
        self.vars
            .iter()
            .map(|(key, var)| {
                if selected.contains(key) {
                    var.negative()
                } else {
                    var.positive()
                }
            })
            .collect()
    }
}

/// Labels each node with its component in the graph `(0..n, edges)`.
fn component_labels(n: usize, edges: &[EdgeKey]) -> (Vec<usize>, usize) {
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut u: usize) -> usize {
        while parent[u] != u {
            parent[u] = parent[parent[u]];
            u = parent[u];
        }
        u
    }

    for key in edges {
        let (a, b) = (find(&mut parent, key.0), find(&mut parent, key.1));
        if a != b {
            parent[a] = b;
        }
    }

    let mut labels = vec![usize::MAX; n];
    let mut root_label = vec![usize::MAX; n];
    let mut count = 0;
    for u in 0..n {
        let root = find(&mut parent, u);
        if root_label[root] == usize::MAX {
            root_label[root] = count;
            count += 1;
        }
        labels[u] = root_label[root];
    }
    (labels, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generators;
    use proptest::prelude::*;
    use std::time::Duration;

    /// Two disjoint triangles joined by a single bridge edge (2, 3).
    fn bowtie_bridge() -> Graph {
        Graph::from_edges(
            6,
            [
                (0, 1, 1.0),
                (1, 2, 1.0),
                (2, 0, 1.0),
                (3, 4, 1.0),
                (4, 5, 1.0),
                (5, 3, 1.0),
                (2, 3, 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cycle_graph_returns_all_edges() {
        for n in 3..8 {
            let g = generators::cycle(n, 1.0);
            let cycle = HamiltonianCycleEncoder::new(&g).unwrap().solve().unwrap().unwrap();
            let expected: Vec<EdgeKey> = {
                let mut keys: Vec<EdgeKey> = g.edges().iter().map(|e| e.key).collect();
                keys.sort_unstable();
                keys
            };
            assert_eq!(cycle.edges(), expected.as_slice(), "n={n}");
        }
    }

    #[test]
    fn test_disconnected_graph_has_no_cycle() {
        let mut g = Graph::new(6);
        for (u, v) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
            g.add_edge(u, v, 1.0).unwrap();
        }
        let mut encoder = HamiltonianCycleEncoder::new(&g).unwrap();
        assert_eq!(encoder.solve().unwrap(), None);
        assert!(encoder.stats().cuts >= 1);
    }

    #[test]
    fn test_bridge_graph_has_no_cycle() {
        let g = bowtie_bridge();
        assert_eq!(HamiltonianCycleEncoder::new(&g).unwrap().solve().unwrap(), None);
    }

    #[test]
    fn test_square_with_diagonals() {
        let g = Graph::from_edges(
            4,
            [
                (0, 1, 1.0),
                (1, 2, 1.0),
                (2, 3, 1.0),
                (3, 0, 1.0),
                (0, 2, 10.0),
                (1, 3, 10.0),
            ],
        )
        .unwrap();
        let cycle = HamiltonianCycleEncoder::new(&g).unwrap().solve().unwrap().unwrap();
        assert!(cycle.is_hamiltonian_in(&g));
        assert_eq!(cycle.len(), 4);
    }

    #[test]
    fn test_tiny_graphs() {
        assert_eq!(
            HamiltonianCycleEncoder::new(&Graph::new(1)).unwrap().solve().unwrap(),
            None
        );
        assert_eq!(
            HamiltonianCycleEncoder::new(&generators::complete(2, 1.0))
                .unwrap()
                .solve()
                .unwrap(),
            None
        );
        assert!(matches!(
            HamiltonianCycleEncoder::new(&Graph::new(0)),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_petersen_graph_is_not_hamiltonian() {
        let outer = (0..5).map(|i| (i, (i + 1) % 5, 1.0));
        let spokes = (0..5).map(|i| (i, i + 5, 1.0));
        let inner = (0..5).map(|i| (i + 5, (i + 2) % 5 + 5, 1.0));
        let g = Graph::from_edges(10, outer.chain(spokes).chain(inner)).unwrap();
        let mut encoder = HamiltonianCycleEncoder::new(&g).unwrap();
        assert_eq!(encoder.solve().unwrap(), None);
        assert!(encoder.stats().oracle_calls > 1);
    }

    #[test]
    fn test_result_is_cached() {
        let g = generators::complete(5, 1.0);
        let mut encoder = HamiltonianCycleEncoder::new(&g).unwrap();
        let first = encoder.solve().unwrap();
        let calls = encoder.stats().oracle_calls;
        assert_eq!(encoder.solve().unwrap(), first);
        assert_eq!(encoder.stats().oracle_calls, calls);
    }

    #[test]
    fn test_expired_timer_times_out() {
        let g = generators::complete(6, 1.0);
        let mut encoder = HamiltonianCycleEncoder::new(&g).unwrap();
        assert_eq!(
            encoder.solve_within(Timer::new(Some(Duration::ZERO))).unwrap(),
            CycleSearch::TimedOut
        );
        // Resumes when given time.
        assert!(matches!(
            encoder.solve_within(Timer::unlimited()).unwrap(),
            CycleSearch::Found(_)
        ));
    }

    #[test]
    fn test_component_labels() {
        let (labels, count) = component_labels(5, &[EdgeKey(0, 3), EdgeKey(3, 4)]);
        assert_eq!(count, 3);
        assert_eq!(labels, vec![0, 1, 2, 0, 0]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_found_cycles_are_hamiltonian(n in 3usize..9, p in 0.3f64..1.0, seed in any::<u64>()) {
            let g = generators::random_gnp(n, p, 5, seed);
            if let Some(cycle) = HamiltonianCycleEncoder::new(&g).unwrap().solve().unwrap() {
                prop_assert_eq!(cycle.len(), n);
                prop_assert!(cycle.is_hamiltonian_in(&g));
                prop_assert_eq!(cycle.tour().len(), n);
            }
        }

        #[test]
        fn prop_complete_graphs_are_hamiltonian(n in 3usize..9) {
            let g = generators::complete(n, 1.0);
            let cycle = HamiltonianCycleEncoder::new(&g).unwrap().solve().unwrap();
            prop_assert!(cycle.is_some_and(|c| c.is_hamiltonian_in(&g)));
        }
    }
}
