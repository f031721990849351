//! Backend HTTP surface of the user profile service.

use std::{sync::Arc, time::Instant};

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::clients::UserClient;

pub mod error;
pub mod routes;

use routes::{
    complete_profile_handler, get_user_handler, health_handler, not_found_handler, root_handler,
    update_user_handler, upsert_user_handler,
};

const BODY_LIMIT: usize = 50 * 1024 * 1024;

pub struct AppState {
    pub users: UserClient,
    pub started_at: Instant,
    pub environment: String,
}

impl AppState {
    pub fn new(users: UserClient, environment: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            users,
            started_at: Instant::now(),
            environment: environment.into(),
        })
    }
}

pub fn router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse()
                .map_err(|_| warn!(%origin, "Ignoring malformed CORS origin"))
                .ok()
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/users", post(upsert_user_handler))
        .route("/api/users/complete-profile", post(complete_profile_handler))
        .route(
            "/api/users/:identity_key",
            get(get_user_handler).put(update_user_handler),
        )
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
