use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dp_ingest::{extract_texts, SourceFormat};

fn text_corpus(n: usize) -> String {
    (0..n)
        .map(|i| format!("document number {i} with some filler words"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn csv_corpus(n: usize) -> String {
    (0..n)
        .map(|i| format!("doc {i},\"quoted, field {i}\",tail"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn json_corpus(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| format!("{{\"content\": \"document number {i}\"}}"))
        .collect();
    format!("[{}]", items.join(","))
}

fn bench_extract(c: &mut Criterion) {
    let text = text_corpus(1000);
    c.bench_function("extract_text_1k_lines", |b| {
        b.iter(|| black_box(extract_texts(SourceFormat::Text, &text).unwrap()))
    });

    let csv = csv_corpus(1000);
    c.bench_function("extract_csv_1k_rows", |b| {
        b.iter(|| black_box(extract_texts(SourceFormat::Csv, &csv).unwrap()))
    });

    let json = json_corpus(1000);
    c.bench_function("extract_json_1k_objects", |b| {
        b.iter(|| black_box(extract_texts(SourceFormat::Json, &json).unwrap()))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
