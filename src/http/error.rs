use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::user_actor::UserError;

#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Maps a failed read. Store trouble on a read is the server's fault.
    pub fn from_read(error: UserError) -> Self {
        match error {
            UserError::PersistenceError(message) => {
                error!(%message, "Read failed");
                ApiError::Internal(message)
            }
            other => other.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::NotFound(_) => ApiError::NotFound,
            UserError::ValidationError(message) => ApiError::BadRequest(message),
            // A write that could not be saved reports its reason as a 400.
            UserError::PersistenceError(message) => ApiError::BadRequest(message),
            UserError::ActorCommunicationError(message) => {
                error!(%message, "User service unavailable");
                ApiError::Internal(message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
