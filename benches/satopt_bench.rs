//! Criterion benchmarks for the SAT-driven solvers.
//!
//! Instances are seeded random Euclidean graphs so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_satopt::btsp::{BottleneckTspSolver, BtspConfig, SearchStrategy};
use u_satopt::graph::generators;
use u_satopt::hamiltonian::HamiltonianCycleEncoder;
use u_satopt::kcenter::{KCenterConfig, KCenterSolver, RadiusSearch};

fn bench_kcenter_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("kcenter_exact");
    group.sample_size(10);

    for (n, k) in [(20usize, 3usize), (40, 4), (60, 5)] {
        let graph = generators::random_euclidean(n, 42);
        for search in [RadiusSearch::Bisection, RadiusSearch::LinearShrink] {
            let solver = KCenterSolver::new(&graph)
                .and_then(|s| s.with_config(KCenterConfig::default().with_search(search)))
                .unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{search:?}"), format!("n{n}_k{k}")),
                &k,
                |b, &k| {
                    b.iter(|| {
                        let result = solver.solve_exact(black_box(k)).unwrap();
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_hamiltonian_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamiltonian_cycle");
    group.sample_size(10);

    for &n in &[10, 20, 30] {
        let graph = generators::random_gnp(n, 0.3, 10, 7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, g| {
            b.iter(|| {
                let cycle = HamiltonianCycleEncoder::new(black_box(g))
                    .unwrap()
                    .solve()
                    .unwrap();
                black_box(cycle)
            })
        });
    }
    group.finish();
}

fn bench_btsp(c: &mut Criterion) {
    let mut group = c.benchmark_group("btsp");
    group.sample_size(10);

    for &n in &[8, 12, 16] {
        let graph = generators::random_euclidean(n, 3);
        for strategy in SearchStrategy::ALL {
            let solver = BottleneckTspSolver::new(&graph)
                .and_then(|s| s.with_config(BtspConfig::default().with_strategy(strategy)))
                .unwrap();
            group.bench_with_input(BenchmarkId::new(strategy.to_string(), n), &n, |b, _| {
                b.iter(|| {
                    let result = solver.optimize_bottleneck().unwrap();
                    black_box(result)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_kcenter_exact, bench_hamiltonian_cycle, bench_btsp);
criterion_main!(benches);
