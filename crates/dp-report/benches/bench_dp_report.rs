use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dp_core::{DetectionMethod, DetectionParams, RepresentativePolicy};
use dp_engine::{Corpus, DetectionPipeline};
use dp_report::render_markdown;

fn synthetic_outcome(n: usize) -> dp_engine::PipelineOutcome {
    let texts: Vec<String> = (0..n)
        .map(|i| {
            if i % 4 == 3 {
                format!("shared sentence that repeats across the corpus number {}", i - 1)
            } else {
                format!("shared sentence that repeats across the corpus number {i}")
            }
        })
        .collect();
    let corpus = Corpus::from_texts(texts);
    let pipeline =
        DetectionPipeline::new(DetectionParams::default(), RepresentativePolicy::Shortest);
    pipeline.run(&corpus, &[DetectionMethod::ShingleMinhash])
}

fn bench_render(c: &mut Criterion) {
    let outcome = synthetic_outcome(1000);
    c.bench_function("render_markdown_1k_docs", |b| {
        b.iter(|| black_box(render_markdown(&outcome)))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
