/*!
 * Resumable Sort Benchmarks
 *
 * Cost of checkpointing and context switching at different latencies
 */

use cosort::runtime::{QuantumConfig, Scheduler};
use cosort::{MemoryReader, SortProgram, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

/// Deterministic scrambled input
fn scrambled(len: usize, seed: i64) -> Vec<Value> {
    (0..len as i64)
        .map(|i| (i * 7_919 + seed * 104_729) % 10_007)
        .collect()
}

fn bench_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_latency");

    for micros in [0u64, 10, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(micros), &micros, |b, &micros| {
            b.iter(|| {
                let programs = (0..4).map(|seed| SortProgram::new(scrambled(2_000, seed)));
                let sorted = Scheduler::builder()
                    .with_quantum(QuantumConfig::from_micros(micros))
                    .with_contexts(programs)
                    .build()
                    .unwrap()
                    .run_to_completion()
                    .unwrap();
                black_box(sorted);
            });
        });
    }

    group.finish();
}

fn bench_context_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_contexts");

    for contexts in [1usize, 8, 32] {
        group.bench_with_input(
            BenchmarkId::from_parameter(contexts),
            &contexts,
            |b, &contexts| {
                b.iter(|| {
                    let sorted = Scheduler::builder()
                        .with_quantum(QuantumConfig::every_checkpoint())
                        .with_contexts((0..contexts as i64).map(|seed| SortProgram::new(scrambled(256, seed))))
                        .build()
                        .unwrap()
                        .run_to_completion()
                        .unwrap();
                    black_box(sorted);
                });
            },
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut reader = MemoryReader::new().with_pending_polls(2);
    let mut inputs = Vec::new();
    for seed in 0..4 {
        let path = PathBuf::from(format!("input{}", seed));
        let text: Vec<String> = scrambled(1_000, seed).iter().map(|v| v.to_string()).collect();
        reader = reader.with_file(path.clone(), text.join(" "));
        inputs.push(path);
    }

    c.bench_function("pipeline_memory_reader", |b| {
        b.iter(|| {
            let output = cosort::run_pipeline(&inputs, reader.clone(), QuantumConfig::from_micros(100)).unwrap();
            black_box(cosort::merge_sorted(output.arrays));
        });
    });
}

criterion_group!(benches, bench_latency, bench_context_count, bench_pipeline);
criterion_main!(benches);
