use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during user profile operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("User store error: {0}")]
    PersistenceError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Validation(message) => UserError::ValidationError(message),
            FrameworkError::Persistence(message) => UserError::PersistenceError(message),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                UserError::ActorCommunicationError(e.to_string())
            }
        }
    }
}
