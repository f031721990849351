use tracing::{debug, instrument};
use crate::actor_framework::ResourceClient;
use crate::domain::{ProfileCompletion, UserPatch, UserRecord, UserUpsert};
use crate::user_actor::{ProfileAction, UserError};

/// Client for the user profile service.
///
/// This is the only path to the user records; HTTP handlers and tests alike go
/// through it.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<UserRecord>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<UserRecord>) -> Self {
        Self { inner }
    }

    /// Exact lookup by identity key. A miss never creates a record.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self, identity_key: String) -> Result<UserRecord, UserError> {
        debug!("Sending request");
        self.inner
            .get(identity_key.clone())
            .await?
            .ok_or(UserError::NotFound(identity_key))
    }

    /// Creates the record on first sight of an identity key, merges otherwise.
    #[instrument(skip(self, upsert), fields(identity_key = %upsert.identity_key))]
    pub async fn upsert_profile(&self, upsert: UserUpsert) -> Result<UserRecord, UserError> {
        debug!("Sending request");
        let identity_key = require_identity_key(&upsert.identity_key)?;
        Ok(self.inner.upsert(identity_key, upsert).await?)
    }

    #[instrument(skip(self, completion), fields(identity_key = %completion.identity_key()))]
    pub async fn complete_profile(&self, completion: ProfileCompletion) -> Result<UserRecord, UserError> {
        debug!("Sending request");
        let identity_key = require_identity_key(completion.identity_key())?;
        Ok(self
            .inner
            .perform_action(identity_key, ProfileAction::Complete(completion))
            .await?)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_profile(&self, identity_key: String, patch: UserPatch) -> Result<UserRecord, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(identity_key, patch).await?)
    }
}

fn require_identity_key(identity_key: &str) -> Result<String, UserError> {
    if identity_key.is_empty() {
        return Err(UserError::ValidationError("identityKey is required".to_string()));
    }
    Ok(identity_key.to_string())
}
