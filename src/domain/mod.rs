//! Domain layer - Core business logic and rules
//!
//! This layer contains:
//! - Entities: call records and the fields that may change on them
//! - Domain rules: floor derivation and resting floor prediction
//! - Repository Interfaces: the call store port

pub mod call;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
