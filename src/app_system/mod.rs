//! System orchestration, startup, and shutdown logic.

pub mod profile_system;
pub mod tracing;
pub mod error;
pub mod signal;

pub use self::profile_system::*;
pub use self::tracing::*;
pub use self::error::*;
pub use self::signal::*;
