use axum::body::Body;
use axum::http::Request;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dp_server::{app_with_state, state::AppState};
use tokio::runtime::Runtime;
use tower::ServiceExt;

fn bench_http_health(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("http_health_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                for _ in 0..1000 {
                    let app = app_with_state(AppState::default());
                    let req = Request::builder()
                        .uri("/api/v1/health")
                        .body(Body::empty())
                        .unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

fn bench_http_detect(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let texts: Vec<String> = (0..50)
        .map(|i| format!("benchmark document number {} with shared filler text", i % 10))
        .collect();
    let body = serde_json::json!({ "texts": texts, "method": "shingle_minhash" });

    c.bench_function("http_detect_shingle_50_docs", |b| {
        b.iter(|| {
            rt.block_on(async {
                let app = app_with_state(AppState::default());
                let req = Request::builder()
                    .method("POST")
                    .uri("/api/v1/detect")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap();
                let resp = app.oneshot(req).await.unwrap();
                black_box(resp.status());
            })
        })
    });
}

criterion_group!(benches, bench_http_health, bench_http_detect);
criterion_main!(benches);
