use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, error};

use super::{user_url, ProxyError, ProxyState};

pub async fn get_user_handler(
    State(state): State<Arc<ProxyState>>,
    Path(id): Path<String>,
) -> Response {
    forward_get(&state, &id).await.unwrap_or_else(|e| {
        error!(error = %e, "Get user error");
        e.into_response()
    })
}

pub async fn update_user_handler(
    State(state): State<Arc<ProxyState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = match body {
        Ok(Json(body)) => forward_put(&state, &id, body).await,
        Err(rejection) => Err(ProxyError::MalformedBody(rejection.body_text())),
    };

    result.unwrap_or_else(|e| {
        error!(error = %e, "Update user error");
        e.into_response()
    })
}

async fn forward_get(state: &ProxyState, id: &str) -> Result<Response, ProxyError> {
    let url = user_url(&state.base_url, id)?;
    debug!(%url, "Forwarding GET");

    let response = state
        .client
        .get(url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Ok((status, Json(json!({ "message": "User not found" }))).into_response());
    }

    let data: Value = response.json().await?;
    Ok(Json(data).into_response())
}

async fn forward_put(state: &ProxyState, id: &str, body: Value) -> Result<Response, ProxyError> {
    let url = user_url(&state.base_url, id)?;
    debug!(%url, "Forwarding PUT");

    let response = state.client.put(url).json(&body).send().await?;

    let status = response.status();
    let data: Value = response.json().await?;
    if !status.is_success() {
        return Ok((status, Json(data)).into_response());
    }

    Ok(Json(data).into_response())
}
