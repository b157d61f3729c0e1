//! Persistence implementations

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod database;
#[cfg(feature = "sqlite")]
pub mod call_repository;

pub use memory::InMemoryCallStore;
#[cfg(feature = "sqlite")]
pub use database::{create_pool, DatabaseConfig};
#[cfg(feature = "sqlite")]
pub use call_repository::SqliteCallStore;
