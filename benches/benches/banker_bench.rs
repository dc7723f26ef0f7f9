//! # Banker Benchmarks
//!
//! Measures the safety simulation and the full request protocol
//! (checks, checkpoint, speculative apply, safety, commit/rollback).
//! Safety is O(P² · R) in the worst case.
//!
//! Run: `cargo bench --bench banker_bench`

use banker_core::{Banker, Scenario, ScanOrder, Units};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Estado seguro de pior caso: P(i) retém 1 unidade de cada tipo e
/// precisa de P - i; só o último processo cabe no início e cada término
/// libera o próximo, então a varredura percorre P passadas
fn chain(processes: usize, resource_types: usize) -> Banker {
    let available = vec![1 as Units; resource_types];
    let maximum: Vec<Vec<Units>> = (0..processes)
        .map(|i| vec![(processes - i + 1) as Units; resource_types])
        .collect();
    let allocation = vec![vec![1 as Units; resource_types]; processes];
    Banker::new(processes, resource_types, &available, &maximum, &allocation).unwrap()
}

/// Benchmark do algoritmo de segurança
fn bench_is_safe(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_safe");

    let textbook = Scenario::textbook().build().unwrap();
    group.bench_function("textbook", |b| b.iter(|| black_box(textbook.is_safe())));

    for processes in [16, 64, 256] {
        let banker = chain(processes, 4);
        group.bench_with_input(BenchmarkId::new("chain", processes), &banker, |b, banker| {
            b.iter(|| black_box(banker.is_safe()))
        });
    }

    group.finish();
}

/// Benchmark das ordens de varredura
fn bench_scan_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_order");

    for order in [ScanOrder::Restart, ScanOrder::Sweep] {
        let mut scenario = Scenario::textbook();
        scenario.engine.scan_order = order;
        let banker = scenario.build().unwrap();
        group.bench_function(order.as_str(), |b| b.iter(|| black_box(banker.safety_trace())));
    }

    group.finish();
}

/// Benchmark do protocolo de pedido
fn bench_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_resources");

    let textbook = Scenario::textbook().build().unwrap();

    group.bench_function("granted", |b| {
        b.iter_batched(
            || textbook.clone(),
            |mut banker| black_box(banker.request_resources(1, &[1, 0, 2])),
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("denied_rollback", |b| {
        b.iter_batched(
            || textbook.clone(),
            |mut banker| black_box(banker.request_resources(4, &[3, 3, 0])),
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("exceeds_claim", |b| {
        let mut banker = textbook.clone();
        b.iter(|| black_box(banker.request_resources(2, &[0, 1, 0])))
    });

    group.finish();
}

criterion_group!(benches, bench_is_safe, bench_scan_order, bench_request);
criterion_main!(benches);
