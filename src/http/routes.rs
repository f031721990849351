use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::domain::{ProfileCompletion, ProfileCompletionRequest, UserPatch, UserRecord, UserUpsert};

use super::{error::ApiError, AppState};

pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Mini LinkedIn API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "users": "/api/users",
        },
    }))
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "environment": state.environment,
    }))
}

pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Path(identity_key): Path<String>,
) -> Result<Json<UserRecord>, ApiError> {
    let user = state
        .users
        .fetch_profile(identity_key)
        .await
        .map_err(ApiError::from_read)?;

    Ok(Json(user))
}

pub async fn upsert_user_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserUpsert>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(upsert) = payload?;
    let user = state.users.upsert_profile(upsert).await?;

    info!(identity_key = %user.identity_key, "Profile upserted");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn complete_profile_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProfileCompletionRequest>, JsonRejection>,
) -> Result<Json<UserRecord>, ApiError> {
    let Json(request) = payload?;
    let completion = ProfileCompletion::try_from(request).map_err(ApiError::BadRequest)?;
    let user = state.users.complete_profile(completion).await?;

    info!(identity_key = %user.identity_key, "Profile completed");
    Ok(Json(user))
}

pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Path(identity_key): Path<String>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<UserRecord>, ApiError> {
    let Json(patch) = payload?;
    let user = state.users.update_profile(identity_key, patch).await?;

    Ok(Json(user))
}

pub async fn not_found_handler(method: Method, uri: Uri) -> impl IntoResponse {
    info!(%method, path = %uri.path(), "Route not found");
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "Route not found",
            "path": uri.path(),
            "method": method.as_str(),
        })),
    )
}
