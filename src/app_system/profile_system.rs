use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::config::{Config, RetryPolicy};
use crate::domain::UserRecord;
use crate::store::{DocumentStore, JsonFileStore, MemoryStore};

use super::SystemError;

/// The user service: the record store actor and the client handed to callers.
///
/// Responsible for opening the store, starting the actor, and draining it on
/// shutdown.
pub struct ProfileSystem {
    pub user_client: UserClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ProfileSystem {
    /// Starts with the backend named by the config.
    pub async fn start(config: &Config) -> Result<Self, SystemError> {
        match &config.data_path {
            Some(path) => {
                let store = JsonFileStore::<UserRecord>::new(path);
                info!(path = %store.path().display(), "Using JSON file store");
                Self::with_store(store, config.store_retry).await
            }
            None => {
                warn!("DATA_PATH not set, user records are kept in memory only");
                Self::with_store(MemoryStore, config.store_retry).await
            }
        }
    }

    pub async fn with_store(
        mut store: impl DocumentStore<UserRecord>,
        retry: RetryPolicy,
    ) -> Result<Self, SystemError> {
        let documents = open_store(&mut store, retry).await?;

        let (user_actor, user_resource_client) = ResourceActor::new(32, store, documents);
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        Ok(Self {
            user_client,
            handles: vec![user_handle],
        })
    }

    /// Drops the client (closing the mailbox) and waits for the actor to drain.
    ///
    /// Clones of the client held elsewhere keep the actor alive; drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

/// Loads every document, retrying with bounded exponential backoff.
async fn open_store(
    store: &mut impl DocumentStore<UserRecord>,
    retry: RetryPolicy,
) -> Result<Vec<UserRecord>, SystemError> {
    let mut attempt = 0;
    loop {
        match store.load().await {
            Ok(documents) => {
                info!(documents = documents.len(), "Store opened");
                return Ok(documents);
            }
            Err(e) if attempt + 1 < retry.attempts => {
                let delay = retry.backoff(attempt);
                warn!(attempt = attempt + 1, error = %e, ?delay, "Store open failed, retrying");
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(attempts = retry.attempts, error = %e, "Giving up on store");
                return Err(SystemError::StoreUnavailable {
                    attempts: retry.attempts,
                    source: e,
                });
            }
        }
    }
}
