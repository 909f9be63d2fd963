use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dp_index::distance::DistanceMetric;
use dp_index::index::{FlatIndex, VectorIndex};
use rand::Rng;

fn random_vector(dim: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..dim).map(|_| rng.gen::<f32>()).collect()
}

fn bench_flat_insert(c: &mut Criterion) {
    let dim = 128;
    c.bench_function("flat_insert_1k_128d", |b| {
        b.iter(|| {
            let idx = FlatIndex::with_capacity(dim, DistanceMetric::Cosine, 1000);
            for i in 0..1000usize {
                idx.insert(i, &random_vector(dim)).unwrap();
            }
            black_box(&idx);
        })
    });
}

fn bench_flat_search(c: &mut Criterion) {
    let dim = 128;
    let idx = FlatIndex::with_capacity(dim, DistanceMetric::Cosine, 10_000);
    for i in 0..10_000usize {
        idx.insert(i, &random_vector(dim)).unwrap();
    }

    c.bench_function("flat_search_top5_from_10k", |b| {
        let query = random_vector(dim);
        b.iter(|| {
            black_box(idx.search(&query, 5).unwrap());
        })
    });
}

criterion_group!(benches, bench_flat_insert, bench_flat_search);
criterion_main!(benches);
