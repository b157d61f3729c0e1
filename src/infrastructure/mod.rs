//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - Call store implementations (SQLite, in-memory)
//! - Connection pool setup

pub mod persistence;
