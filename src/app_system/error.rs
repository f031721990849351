use thiserror::Error;

use crate::config::ConfigError;
use crate::proxy::ProxyError;
use crate::store::StoreError;

/// Errors that stop a process from starting or shutting down cleanly.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Store unavailable after {attempts} attempts: {source}")]
    StoreUnavailable {
        attempts: u32,
        #[source]
        source: StoreError,
    },
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
    #[error(transparent)]
    Proxy(#[from] ProxyError),
}
