//! Interface layer - External interfaces
//!
//! This layer handles:
//! - REST API endpoints
//! - Request validation and response formatting
//! - CSV export

pub mod api;
