//! Call store interface

use super::field::CallField;
use super::record::{CallRecord, NewCall};
use crate::domain::shared::Result;
use async_trait::async_trait;

/// Persistence port for the call log
///
/// Defined in the domain layer as a trait (port) and implemented in the
/// infrastructure layer (adapter). The store owns the table exclusively and
/// carries no business logic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallStore: Send + Sync {
    /// Create the table if it does not exist yet
    async fn create_schema(&self) -> Result<()>;

    /// Drop and recreate the table, discarding every record
    async fn reset_schema(&self) -> Result<()>;

    /// Append one record, stamping the current time when none is given
    async fn insert(&self, call: NewCall) -> Result<()>;

    /// Destination floor of the most recently inserted record
    async fn last_destination_floor(&self) -> Result<Option<i64>>;

    /// All records in id order
    async fn get_all(&self) -> Result<Vec<CallRecord>>;

    /// Check whether a record with the given id exists
    async fn row_exists(&self, id: i64) -> Result<bool>;

    /// Set exactly one column of one record
    async fn update_field(&self, id: i64, field: CallField) -> Result<()>;

    /// Set several columns of one record, all or nothing
    async fn update_fields(&self, id: i64, fields: Vec<CallField>) -> Result<()>;

    /// Remove every record, keeping the table
    async fn delete_all(&self) -> Result<u64>;
}
