//! Benchmarks for qubit-reuse compilation
//!
//! Run with: cargo bench -p ouro-compile

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use ouro_compile::{
    MatrixMethod, PlannerMethod, ReduceOptions, biadjacency_and_candidate_matrices, reduce,
};
use ouro_ir::Circuit;

/// Benchmark the two dependency-matrix fixpoints against each other.
fn bench_matrix_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_matrices");

    for bits in &[4, 8, 16] {
        let circuit = Circuit::ripple_carry_adder(*bits).unwrap();
        group.bench_with_input(
            BenchmarkId::new("boolean_matrix", bits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    biadjacency_and_candidate_matrices(
                        black_box(circuit),
                        MatrixMethod::BooleanMatrix,
                    )
                    .unwrap()
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("transitive_closure", bits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    biadjacency_and_candidate_matrices(
                        black_box(circuit),
                        MatrixMethod::TransitiveClosure,
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark end-to-end reduction across planners.
fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    let adder = Circuit::ripple_carry_adder(10).unwrap();
    group.bench_function("adder_deterministic", |b| {
        let opts = ReduceOptions::new();
        b.iter(|| reduce(black_box(&adder), &opts).unwrap());
    });
    group.bench_function("adder_dckf_first_qubit_search", |b| {
        let opts = ReduceOptions::new().with_method(PlannerMethod::DckfFirstQubitSearch);
        b.iter(|| reduce(black_box(&adder), &opts).unwrap());
    });

    let edges: Vec<(u32, u32)> = (0..30).map(|i| (i, (i + 1) % 30)).collect();
    let qaoa = Circuit::maxcut_qaoa(30, &edges, 1).unwrap();
    group.bench_function("qaoa_random_greedy", |b| {
        let opts = ReduceOptions::new()
            .with_method(PlannerMethod::RandomGreedy)
            .with_shots(5)
            .with_seed(17);
        b.iter(|| reduce(black_box(&qaoa), &opts).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_matrix_methods, bench_reduce);
criterion_main!(benches);
