//! Forwarding layer between browser-side callers and the user service.
//!
//! No business logic lives here. Upstream failures are relayed (with a fixed
//! body on reads), and anything that goes wrong inside the proxy itself turns
//! into a 500 with a generic message.

use std::sync::Arc;

use axum::{routing::get, Router};
use reqwest::{Client, Url};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;

pub use error::ProxyError;

use routes::{get_user_handler, update_user_handler};

pub struct ProxyState {
    pub client: Client,
    pub base_url: Url,
}

impl ProxyState {
    /// `base_url` is the user service API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Result<Arc<Self>, ProxyError> {
        let base_url = Url::parse(base_url).map_err(|e| ProxyError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Arc::new(Self {
            client: Client::new(),
            base_url,
        }))
    }
}

/// `{base}/users/{identity_key}`, with the key encoded as one path segment.
pub fn user_url(base: &Url, identity_key: &str) -> Result<Url, ProxyError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ProxyError::InvalidBaseUrl {
            url: base.to_string(),
            reason: "cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .push("users")
        .push(identity_key);
    Ok(url)
}

pub fn router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route(
            "/api/users/:id",
            get(get_user_handler).put(update_user_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_url_appends_encoded_segment() {
        let base = Url::parse("http://localhost:5000/api").unwrap();
        assert_eq!(
            user_url(&base, "u1").unwrap().as_str(),
            "http://localhost:5000/api/users/u1"
        );

        let trailing = Url::parse("http://localhost:5000/api/").unwrap();
        assert_eq!(
            user_url(&trailing, "a/b c").unwrap().as_str(),
            "http://localhost:5000/api/users/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(ProxyState::new("not a url").is_err());

        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(user_url(&base, "u1").is_err());
    }
}
