//! liftlog - Call log service for a single simulated elevator
//!
//! Every call records where the elevator was resting when it was called.
//! That floor is never stored on its own: it is derived from the destination
//! of the previous call, or the caller's own floor for the very first call.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::error::Result;
