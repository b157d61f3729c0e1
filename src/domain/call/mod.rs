//! Call log bounded context
//!
//! A call is one request to move the elevator: the floor a passenger calls
//! from, the floor they want to reach, and the floor the elevator was resting
//! on at that moment. The resting floor is never tracked on its own; it is
//! always derived from the call log.

pub mod field;
pub mod floor;
pub mod prediction;
pub mod record;
pub mod repository;

pub use field::CallField;
pub use floor::resolve_current_floor;
pub use prediction::{predict_from_log, RestingFloorPrediction, RestingFloorPredictor};
pub use record::{CallRecord, NewCall};
pub use repository::CallStore;

#[cfg(test)]
pub use repository::MockCallStore;
