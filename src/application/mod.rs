//! Application layer - Use cases and application services
//!
//! This layer orchestrates the domain against the call store:
//! - Registering calls under the floor-derivation rule
//! - Rebuilding the log from recorded travels

pub mod call_service;
pub mod seed;

pub use call_service::CallService;
pub use seed::CallSeeder;
