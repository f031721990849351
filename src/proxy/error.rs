use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures inside the proxy itself, as opposed to upstream error responses.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Invalid upstream base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Internal server error" })),
        )
            .into_response()
    }
}
