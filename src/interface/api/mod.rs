//! API interface implementations

pub mod call_dto;
pub mod call_handler;
pub mod export;
pub mod metrics_handler;
pub mod router;

pub use call_dto::{ApiError, CallResponse};
pub use call_handler::AppState;
pub use metrics_handler::{detached_metrics_handle, init_metrics};
pub use router::build_router;
