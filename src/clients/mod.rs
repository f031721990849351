//! Typed handles over the resource actors.

mod user_client;

pub use user_client::*;
