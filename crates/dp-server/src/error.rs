//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// API error with status code and message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            code: "embedding_provider_error",
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal_error",
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<dp_core::DpError> for ApiError {
    fn from(err: dp_core::DpError) -> Self {
        use dp_core::DpError;
        match &err {
            DpError::UnknownMethod(_)
            | DpError::UnknownPolicy(_)
            | DpError::InvalidParams(_)
            | DpError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            // Provider failures are not the caller's fault; surface as-is.
            DpError::Embedding(_) => ApiError::bad_gateway(err.to_string()),
            _ => ApiError::internal(err.to_string()),
        }
    }
}

impl From<dp_ingest::IngestError> for ApiError {
    fn from(err: dp_ingest::IngestError) -> Self {
        use dp_ingest::IngestError;
        match &err {
            IngestError::Io(_) => ApiError::internal(err.to_string()),
            _ => ApiError::bad_request(err.to_string()),
        }
    }
}
