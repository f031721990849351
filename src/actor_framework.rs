use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::store::DocumentStore;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Payloads, and Actions)
// =============================================================================

/// Trait that any document must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, FrameworkError>;

    // --- Lifecycle Hooks ---

    /// Merge a create payload into an entity that already exists under the same ID.
    fn on_upsert(&mut self, payload: Self::CreatePayload) -> Result<(), FrameworkError>;
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, FrameworkError>;
}

/// Failures surfaced by the resource actor and its client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Persistence failed: {0}")]
    Persistence(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Upsert {
        id: T::Id,
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Sole owner of a document collection.
///
/// Every request for every document is handled in mailbox order, so each write
/// is atomic per document and concurrent writers resolve last-writer-wins.
/// Writes are applied to a copy, persisted, and only then committed.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    backend: Box<dyn DocumentStore<T>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        backend: impl DocumentStore<T>,
        documents: Vec<T>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = documents
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        let actor = Self {
            receiver,
            store,
            backend: Box::new(backend),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    pub async fn run(mut self) {
        info!(documents = self.store.len(), "ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Get { id, respond_to } => {
                    debug!(%id, "Processing get request");
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Upsert { id, payload, respond_to } => {
                    debug!(%id, "Processing upsert request");
                    let staged = match self.store.get(&id).cloned() {
                        Some(mut item) => item.on_upsert(payload).map(|_| item),
                        None => T::from_create(id, payload),
                    };
                    let result = match staged {
                        Ok(item) => self.commit(item).await,
                        Err(e) => Err(e),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    debug!(%id, "Processing update request");
                    let result = match self.store.get(&id).cloned() {
                        Some(mut item) => match item.on_update(patch) {
                            Ok(()) => self.commit(item).await,
                            Err(e) => Err(e),
                        },
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    debug!(%id, "Processing action request");
                    let result = match self.store.get(&id).cloned() {
                        Some(mut item) => match item.handle_action(action) {
                            Ok(outcome) => self.commit(item).await.map(|_| outcome),
                            Err(e) => Err(e),
                        },
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        info!("ResourceActor stopped");
    }

    async fn commit(&mut self, item: T) -> Result<T, FrameworkError> {
        if let Err(e) = self.backend.persist(&item).await {
            warn!(id = %item.id(), error = %e, "Failed to persist document");
            return Err(FrameworkError::Persistence(e.to_string()));
        }
        self.store.insert(item.id().clone(), item.clone());
        Ok(item)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    #[cfg(test)]
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Get { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn upsert(&self, id: T::Id, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Upsert { id, payload, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Update { id, patch, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Action { id, action, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
