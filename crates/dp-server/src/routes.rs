use std::str::FromStr;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use dp_core::{DetectionMethod, DetectionParams, RepresentativePolicy};
use dp_engine::{Corpus, DetectionPipeline, PipelineOutcome};
use dp_ingest::SourceFormat;

use crate::error::ApiError;
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/v1/health", get(health))
}

pub fn detect_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/detect", post(detect))
        .route("/api/v1/report", post(report))
}

/// Detection request body.
///
/// Documents come either as a ready `texts` list or as raw `content` plus a
/// `format` name handed to ingestion. Everything else is optional and falls
/// back to the configured defaults.
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub texts: Option<Vec<String>>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    /// `vector_index`, `hyperplane_lsh`, `shingle_minhash`, or `all`.
    #[serde(default = "default_method")]
    pub method: String,
    /// Partial detector overrides, deep-merged over the server's
    /// configured detection defaults. Unmentioned fields keep their
    /// configured values.
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub representative_policy: Option<String>,
}

fn default_method() -> String {
    "all".to_string()
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

async fn detect(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = run_pipeline(&state, request).await?;
    Ok(Json(outcome_to_json(&outcome)))
}

async fn report(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> Result<Response, ApiError> {
    let outcome = run_pipeline(&state, request).await?;
    let markdown = dp_report::render_markdown(&outcome);
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    )
        .into_response())
}

/// Shared request handling: resolve documents, embed when a requested
/// method needs vectors, run the pipeline with per-method isolation.
async fn run_pipeline(
    state: &AppState,
    request: DetectRequest,
) -> Result<PipelineOutcome, ApiError> {
    let methods = parse_methods(&request.method)?;
    let policy = match &request.representative_policy {
        Some(name) => RepresentativePolicy::from_str(name)?,
        None => RepresentativePolicy::default(),
    };
    let params = resolve_params(state.config.detection, request.params.clone())?;

    let texts = resolve_texts(&request)?;
    tracing::info!(
        "detect request: {} documents, methods [{}]",
        texts.len(),
        request.method
    );

    let corpus = if methods.iter().any(|m| m.needs_embeddings()) {
        let embeddings = state.embedder.embed_batch(&texts).await?;
        Corpus::with_embeddings(texts, embeddings)?
    } else {
        Corpus::from_texts(texts)
    };

    let pipeline = DetectionPipeline::new(params, policy);
    Ok(pipeline.run(&corpus, &methods))
}

/// Apply request overrides on top of the configured detection defaults.
pub(crate) fn resolve_params(
    base: DetectionParams,
    overrides: Option<Value>,
) -> Result<DetectionParams, ApiError> {
    let Some(overrides) = overrides else {
        return Ok(base);
    };
    let mut merged =
        serde_json::to_value(base).map_err(|error| ApiError::internal(error.to_string()))?;
    merge_json(&mut merged, overrides);
    serde_json::from_value(merged)
        .map_err(|error| ApiError::bad_request(format!("invalid detector params: {error}")))
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                merge_json(base_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

fn parse_methods(name: &str) -> Result<Vec<DetectionMethod>, ApiError> {
    if name == "all" {
        return Ok(DetectionMethod::all().to_vec());
    }
    Ok(vec![DetectionMethod::from_str(name)?])
}

fn resolve_texts(request: &DetectRequest) -> Result<Vec<String>, ApiError> {
    if let Some(texts) = &request.texts {
        if texts.is_empty() {
            return Err(ApiError::bad_request("texts must not be empty"));
        }
        return Ok(texts.clone());
    }
    if let Some(content) = &request.content {
        let format = match &request.format {
            Some(name) => SourceFormat::from_str(name)?,
            None => SourceFormat::Text,
        };
        return Ok(dp_ingest::extract_texts(format, content)?);
    }
    Err(ApiError::bad_request(
        "request must provide either texts or content",
    ))
}

fn outcome_to_json(outcome: &PipelineOutcome) -> Value {
    let mut methods = serde_json::Map::new();
    for method_outcome in &outcome.methods {
        let slot = match &method_outcome.result {
            Ok(report) => json!({
                "success": true,
                "stats": report.report.stats,
                "clusters": report.report.clusters,
                "duplicates": report.report.duplicates,
                "kept": report.report.kept,
                "pairs": report.pairs,
                "n_pairs": report.pairs.len(),
                "performance": { "elapsed_ms": report.elapsed_ms },
            }),
            Err(error) => json!({
                "success": false,
                "error": error.to_string(),
            }),
        };
        methods.insert(method_outcome.method.to_string(), slot);
    }
    json!({
        "total_docs": outcome.total_docs,
        "methods": methods,
    })
}
