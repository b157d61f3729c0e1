//! Shared kernel - Types used by every part of the call log

pub mod error;
pub mod value_objects;

pub use error::{DomainError, Result};
pub use value_objects::{CallTimestamp, CALL_DATETIME_FORMAT};
