use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dp_core::{DetectionParams, RepresentativePolicy, SimilarityPair};
use dp_engine::{cluster, hyperplane, shingle, vector};
use rand::Rng;

const WORDS: &[&str] = &[
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliett",
    "kilo", "lima", "mike", "november", "oscar", "papa", "quebec", "romeo", "sierra", "tango",
];

fn random_vector(dim: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..dim).map(|_| rng.gen::<f32>() - 0.5).collect()
}

/// Random corpus where every fourth document is a noisy copy of its
/// predecessor, so the detectors have real work to do.
fn embeddings_with_duplicates(n: usize, dim: usize) -> Vec<Vec<f32>> {
    let mut rng = rand::thread_rng();
    let mut rows: Vec<Vec<f32>> = Vec::with_capacity(n);
    for i in 0..n {
        if i % 4 == 3 {
            let mut copy = rows[i - 1].clone();
            for value in copy.iter_mut() {
                *value += (rng.gen::<f32>() - 0.5) * 0.01;
            }
            rows.push(copy);
        } else {
            rows.push(random_vector(dim));
        }
    }
    rows
}

fn texts_with_duplicates(n: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let mut texts: Vec<String> = Vec::with_capacity(n);
    for i in 0..n {
        if i % 4 == 3 {
            let mut copy = texts[i - 1].clone();
            copy.push_str(" extra");
            texts.push(copy);
        } else {
            let words: Vec<&str> = (0..12).map(|_| WORDS[rng.gen_range(0..WORDS.len())]).collect();
            texts.push(words.join(" "));
        }
    }
    texts
}

fn bench_vector_detect(c: &mut Criterion) {
    let embeddings = embeddings_with_duplicates(1000, 64);
    let params = DetectionParams::default();
    c.bench_function("vector_detect_1k_64d", |b| {
        b.iter(|| {
            black_box(vector::find_duplicates(&embeddings, &params.vector).unwrap());
        })
    });
}

fn bench_hyperplane_detect(c: &mut Criterion) {
    let embeddings = embeddings_with_duplicates(1000, 64);
    let params = DetectionParams::default();
    c.bench_function("hyperplane_detect_1k_64d", |b| {
        b.iter(|| {
            black_box(hyperplane::find_duplicates(&embeddings, &params.hyperplane).unwrap());
        })
    });
}

fn bench_shingle_detect(c: &mut Criterion) {
    let texts = texts_with_duplicates(1000);
    let params = DetectionParams::default();
    c.bench_function("shingle_detect_1k", |b| {
        b.iter(|| {
            black_box(shingle::find_duplicates(&texts, &params.shingle).unwrap());
        })
    });
}

fn bench_cluster(c: &mut Criterion) {
    let texts = texts_with_duplicates(1000);
    let pairs: Vec<SimilarityPair> = (0..1000usize)
        .filter(|i| i % 4 == 3)
        .map(|i| SimilarityPair::new(i - 1, i, 0.9))
        .collect();
    c.bench_function("cluster_1k_250_pairs", |b| {
        b.iter(|| {
            black_box(cluster(&pairs, &texts, None, RepresentativePolicy::Shortest).unwrap());
        })
    });
}

criterion_group!(
    benches,
    bench_vector_detect,
    bench_hyperplane_detect,
    bench_shingle_detect,
    bench_cluster
);
criterion_main!(benches);
