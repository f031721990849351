//! User-specific document logic: merge rules, profile completion, and errors.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
