//! Benchmarks for sweep enumeration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paramsweep::config::{Candidates, ReplacementSpace};
use paramsweep::core::PipelineStep;
use paramsweep::sweep::leaves;
use serde_json::json;

fn grid_space(per_step: usize) -> ReplacementSpace {
    let mut space = ReplacementSpace::new();
    for (step, designator) in PipelineStep::ALL.iter().zip(['a', 'b', 'c', 'd', 'e']) {
        let candidates: Candidates = (0..per_step)
            .map(|i| (format!("{designator}{i:02}"), json!(i)))
            .collect();
        space.insert(*step, format!("#{designator}"), candidates);
    }
    space
}

fn enumeration_benchmark(c: &mut Criterion) {
    let space = grid_space(4);
    c.bench_function("enumerate_1024_leaves", |b| {
        b.iter(|| leaves(black_box(&space)).count());
    });
}

criterion_group!(benches, enumeration_benchmark);
criterion_main!(benches);
