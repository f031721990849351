//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_upsert`] or [`expect_action`] to assert behavior.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls. The test inspects each
/// request and answers it itself, without spinning up a `ResourceActor`.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Upsert request
pub async fn expect_upsert<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::CreatePayload, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Upsert { id, payload, respond_to }) => Some((id, payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProfileCompletion, UserRecord, UserUpsert};
    use crate::user_actor::ProfileAction;

    #[tokio::test]
    async fn test_mock_client_upsert() {
        let (client, mut receiver) = create_mock_client::<UserRecord>(10);

        let upsert_task = tokio::spawn(async move {
            client.upsert("u1".to_string(), UserUpsert::new("u1", "test@example.com")).await
        });

        let (id, payload, responder) = expect_upsert(&mut receiver).await.expect("Expected Upsert request");
        assert_eq!(id, "u1");
        assert_eq!(payload.email, "test@example.com");
        let record = <UserRecord as Entity>::from_create(id, payload).unwrap();
        responder.send(Ok(record.clone())).unwrap();

        let result = upsert_task.await.unwrap();
        assert_eq!(result, Ok(record));
    }

    #[tokio::test]
    async fn test_mock_client_action() {
        let (client, mut receiver) = create_mock_client::<UserRecord>(10);
        let completion = ProfileCompletion::new("u1", "Ada", "Eng", "Bio", "pic").unwrap();

        let action_task = tokio::spawn(async move {
            client.perform_action("u1".to_string(), ProfileAction::Complete(completion)).await
        });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "u1");
        assert!(matches!(action, ProfileAction::Complete(_)));
        responder.send(Err(FrameworkError::NotFound(id))).unwrap();

        assert_eq!(action_task.await.unwrap(), Err(FrameworkError::NotFound("u1".into())));
    }
}
