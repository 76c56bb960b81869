use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keyscan::{MatchConfig, MatchRequest, Pipeline, PipelineConfig};

fn corpus(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{} ", i % 997))
        .collect::<String>()
        + "The quick brown fox jumps over the lazy dog"
}

fn request(keywords: usize) -> MatchRequest {
    MatchRequest {
        keywords: (0..keywords).map(|i| format!("wrd{}", i * 7)).collect(),
        max_distance: 2,
    }
}

fn analyze_bench(c: &mut Criterion) {
    let pipeline = Pipeline::new(&PipelineConfig::default()).expect("pipeline");
    let mut group = c.benchmark_group("analyze");

    for words in [100, 1_000, 10_000] {
        let text = corpus(words);
        let req = request(16);
        group.throughput(Throughput::Elements((words * req.keywords.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(words), &text, |b, text| {
            b.iter(|| pipeline.analyze(black_box(text), black_box(&req)).expect("analysis"));
        });
    }

    group.finish();
}

fn worker_scaling_bench(c: &mut Criterion) {
    let text = corpus(5_000);
    let req = request(64);
    let mut group = c.benchmark_group("workers");

    for workers in [1, 2, 4, 8] {
        let cfg = PipelineConfig {
            matcher: MatchConfig {
                max_workers: workers,
                ..MatchConfig::default()
            },
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(&cfg).expect("pipeline");
        group.bench_function(BenchmarkId::from_parameter(workers), |b| {
            b.iter(|| pipeline.analyze(black_box(&text), black_box(&req)).expect("analysis"));
        });
    }

    group.finish();
}

criterion_group!(benches, analyze_bench, worker_scaling_bench);
criterion_main!(benches);
