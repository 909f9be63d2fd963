use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::app;

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn duplicate_corpus() -> Value {
    json!([
        "the quick brown fox jumps over the lazy dog",
        "the quick brown fox jumps over the lazy dog",
        "completely unrelated text about database migrations",
    ])
}

#[tokio::test]
async fn test_health_returns_ok() {
    let (status, body) = get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert!(body["uptime_secs"].is_number());
}

#[tokio::test]
async fn test_detect_shingle_finds_duplicate_cluster() {
    let (status, body) = post_json(
        "/api/v1/detect",
        json!({ "texts": duplicate_corpus(), "method": "shingle_minhash" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_docs"], 3);

    let slot = &body["methods"]["shingle_minhash"];
    assert_eq!(slot["success"], true);
    assert_eq!(slot["stats"]["n_clusters"], 1);
    assert_eq!(slot["stats"]["n_removed"], 1);
    assert_eq!(slot["stats"]["n_kept"], 2);
    assert_eq!(slot["duplicates"], json!([1]));
    assert_eq!(slot["kept"], json!([0, 2]));
}

#[tokio::test]
async fn test_detect_all_runs_every_method() {
    let (status, body) = post_json(
        "/api/v1/detect",
        json!({ "texts": duplicate_corpus() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let methods = body["methods"].as_object().unwrap();
    assert_eq!(methods.len(), 3);
    for name in ["vector_index", "hyperplane_lsh", "shingle_minhash"] {
        let slot = &methods[name];
        assert_eq!(slot["success"], true, "{name} should succeed");
        assert!(
            slot["stats"]["n_clusters"].as_u64().unwrap() >= 1,
            "{name} should find the duplicate pair"
        );
    }
}

#[tokio::test]
async fn test_detect_unknown_method_is_rejected() {
    let (status, body) = post_json(
        "/api/v1/detect",
        json!({ "texts": duplicate_corpus(), "method": "quantum" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("quantum"));
}

#[tokio::test]
async fn test_detect_unknown_policy_is_rejected() {
    let (status, body) = post_json(
        "/api/v1/detect",
        json!({ "texts": duplicate_corpus(), "representative_policy": "newest" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("newest"));
}

#[tokio::test]
async fn test_detect_without_documents_is_rejected() {
    let (status, body) = post_json("/api/v1/detect", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("texts or content"));
}

#[tokio::test]
async fn test_detect_empty_texts_is_rejected() {
    let (status, _) = post_json("/api/v1/detect", json!({ "texts": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_detect_isolates_failing_method() {
    // nbits 100 is not divisible by 8 bands, so hyperplane fails while
    // the other two methods still run.
    let (status, body) = post_json(
        "/api/v1/detect",
        json!({
            "texts": duplicate_corpus(),
            "params": { "hyperplane": { "nbits": 100 } },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let methods = &body["methods"];
    assert_eq!(methods["hyperplane_lsh"]["success"], false);
    assert!(methods["hyperplane_lsh"]["error"].is_string());
    assert_eq!(methods["vector_index"]["success"], true);
    assert_eq!(methods["shingle_minhash"]["success"], true);
}

#[test]
fn test_partial_params_keep_configured_defaults() {
    // Overriding one detector must not reset the others to the
    // compiled-in defaults when the server was configured differently.
    let mut configured = dp_core::DetectionParams::default();
    configured.vector.similarity_threshold = 0.95;
    configured.hyperplane.hamming_threshold = 3;

    let overrides = json!({ "shingle": { "k_shingles": 7 } });
    let merged = crate::routes::resolve_params(configured, Some(overrides)).unwrap();
    assert_eq!(merged.shingle.k_shingles, 7);
    assert_eq!(merged.vector.similarity_threshold, 0.95);
    assert_eq!(merged.hyperplane.hamming_threshold, 3);

    let merged = crate::routes::resolve_params(configured, None).unwrap();
    assert_eq!(merged.vector.similarity_threshold, 0.95);
}

#[tokio::test]
async fn test_detect_malformed_params_rejected() {
    let (status, body) = post_json(
        "/api/v1/detect",
        json!({
            "texts": duplicate_corpus(),
            "params": { "vector": { "top_k": "many" } },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("invalid detector params"));
}

#[tokio::test]
async fn test_detect_ingests_raw_content() {
    let content = "first duplicated line of text\nfirst duplicated line of text\nsomething else entirely\n";
    let (status, body) = post_json(
        "/api/v1/detect",
        json!({ "content": content, "format": "text", "method": "shingle_minhash" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_docs"], 3);
    assert_eq!(body["methods"]["shingle_minhash"]["stats"]["n_clusters"], 1);
}

#[tokio::test]
async fn test_detect_too_few_ingested_documents_is_rejected() {
    let (status, body) = post_json(
        "/api/v1/detect",
        json!({ "content": "only one line", "format": "text" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("at least 2"));
}

#[tokio::test]
async fn test_detect_pairs_are_canonical() {
    let (_, body) = post_json(
        "/api/v1/detect",
        json!({ "texts": duplicate_corpus(), "method": "vector_index" }),
    )
    .await;
    let pairs = body["methods"]["vector_index"]["pairs"].as_array().unwrap();
    assert!(!pairs.is_empty());
    for pair in pairs {
        assert!(pair["a"].as_u64().unwrap() < pair["b"].as_u64().unwrap());
    }
}

#[tokio::test]
async fn test_report_renders_markdown() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/report")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({
                "texts": duplicate_corpus(),
                "method": "shingle_minhash",
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/markdown; charset=utf-8"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let markdown = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(markdown.starts_with("# Near-Duplicate Detection Report"));
    assert!(markdown.contains("## shingle_minhash"));
}
