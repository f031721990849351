use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::UserRecord;
use crate::proxy::{user_url, ProxyError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Profile request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Profile request returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid profile url: {0}")]
    InvalidUrl(String),
}

impl From<ProxyError> for FetchError {
    fn from(error: ProxyError) -> Self {
        FetchError::InvalidUrl(error.to_string())
    }
}

/// Source the profile cache fills itself from.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch_profile(&self, identity_key: &str) -> Result<UserRecord, FetchError>;
}

/// Fetches profiles through the API proxy over HTTP.
#[derive(Clone)]
pub struct ProxyProfileFetcher {
    client: Client,
    base_url: Url,
}

impl ProxyProfileFetcher {
    /// `base_url` is the proxy's API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }
}

#[async_trait]
impl ProfileFetcher for ProxyProfileFetcher {
    #[instrument(skip(self))]
    async fn fetch_profile(&self, identity_key: &str) -> Result<UserRecord, FetchError> {
        let url = user_url(&self.base_url, identity_key)?;
        debug!(%url, "Fetching profile");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
