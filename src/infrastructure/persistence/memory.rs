//! In-memory call store
//!
//! Mirrors the SQLite table: ids come from a sequence that survives
//! `delete_all` and restarts on `reset_schema`, and every operation fails
//! while the table does not exist.

use crate::domain::call::{CallField, CallRecord, CallStore, NewCall};
use crate::domain::shared::{DomainError, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Table {
    rows: Option<Vec<CallRecord>>,
    last_id: i64,
}

impl Table {
    fn rows(&self) -> Result<&Vec<CallRecord>> {
        self.rows.as_ref().ok_or_else(missing_table)
    }

    fn rows_mut(&mut self) -> Result<&mut Vec<CallRecord>> {
        self.rows.as_mut().ok_or_else(missing_table)
    }
}

fn missing_table() -> DomainError {
    DomainError::storage("no such table: elevator")
}

fn apply(record: &mut CallRecord, field: CallField) {
    match field {
        CallField::CurrentFloor(value) => record.current_floor = value,
        CallField::DemandFloor(value) => record.demand_floor = value,
        CallField::DestinationFloor(value) => record.destination_floor = value,
        CallField::CallDatetime(value) => record.call_datetime = value,
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCallStore {
    table: Mutex<Table>,
}

impl InMemoryCallStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallStore for InMemoryCallStore {
    async fn create_schema(&self) -> Result<()> {
        let mut table = self.table.lock().await;
        if table.rows.is_none() {
            table.rows = Some(Vec::new());
        }
        Ok(())
    }

    async fn reset_schema(&self) -> Result<()> {
        let mut table = self.table.lock().await;
        *table = Table {
            rows: Some(Vec::new()),
            last_id: 0,
        };
        Ok(())
    }

    async fn insert(&self, call: NewCall) -> Result<()> {
        let mut table = self.table.lock().await;
        let id = table.last_id + 1;
        table.rows_mut()?.push(call.into_record(id));
        table.last_id = id;
        Ok(())
    }

    async fn last_destination_floor(&self) -> Result<Option<i64>> {
        let table = self.table.lock().await;
        Ok(table.rows()?.last().map(|r| r.destination_floor))
    }

    async fn get_all(&self) -> Result<Vec<CallRecord>> {
        let table = self.table.lock().await;
        Ok(table.rows()?.clone())
    }

    async fn row_exists(&self, id: i64) -> Result<bool> {
        let table = self.table.lock().await;
        Ok(table.rows()?.iter().any(|r| r.id == id))
    }

    async fn update_field(&self, id: i64, field: CallField) -> Result<()> {
        let mut table = self.table.lock().await;
        let record = table
            .rows_mut()?
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::row_not_found(id))?;

        apply(record, field);
        Ok(())
    }

    async fn update_fields(&self, id: i64, fields: Vec<CallField>) -> Result<()> {
        let mut table = self.table.lock().await;
        let record = table
            .rows_mut()?
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::row_not_found(id))?;

        for field in fields {
            apply(record, field);
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut table = self.table.lock().await;
        let rows = table.rows_mut()?;
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }
}
