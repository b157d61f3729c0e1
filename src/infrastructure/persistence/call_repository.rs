//! SQLite implementation of the call store

use crate::domain::call::{CallField, CallRecord, CallStore, NewCall};
use crate::domain::shared::{CallTimestamp, DomainError, Result};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::{debug, error};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS elevator (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        current_floor INTEGER NOT NULL,
        demand_floor INTEGER NOT NULL,
        destination_floor INTEGER NOT NULL,
        call_datetime TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

#[derive(FromRow)]
struct CallRow {
    id: i64,
    current_floor: i64,
    demand_floor: i64,
    destination_floor: i64,
    call_datetime: String,
}

impl TryFrom<CallRow> for CallRecord {
    type Error = DomainError;

    fn try_from(r: CallRow) -> Result<Self> {
        let call_datetime = CallTimestamp::parse(&r.call_datetime).map_err(|_| {
            DomainError::storage(format!(
                "Row {} has malformed call_datetime '{}'",
                r.id, r.call_datetime
            ))
        })?;

        Ok(CallRecord {
            id: r.id,
            current_floor: r.current_floor,
            demand_floor: r.demand_floor,
            destination_floor: r.destination_floor,
            call_datetime,
        })
    }
}

// One static statement per column; only the values are bound
fn update_statement(id: i64, field: CallField) -> Query<'static, Sqlite, SqliteArguments<'static>> {
    let query = match field {
        CallField::CurrentFloor(value) => {
            sqlx::query("UPDATE elevator SET current_floor = ? WHERE id = ?").bind(value)
        }
        CallField::DemandFloor(value) => {
            sqlx::query("UPDATE elevator SET demand_floor = ? WHERE id = ?").bind(value)
        }
        CallField::DestinationFloor(value) => {
            sqlx::query("UPDATE elevator SET destination_floor = ? WHERE id = ?").bind(value)
        }
        CallField::CallDatetime(value) => {
            sqlx::query("UPDATE elevator SET call_datetime = ? WHERE id = ?").bind(value.to_string())
        }
    };
    query.bind(id)
}

fn storage_error(action: &str, e: sqlx::Error) -> DomainError {
    error!("Failed to {}: {}", action, e);
    DomainError::storage(e.to_string())
}

/// Call store backed by a SQLite pool
///
/// Each operation borrows one pooled connection for its duration only.
pub struct SqliteCallStore {
    pool: SqlitePool,
}

impl SqliteCallStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection; later operations fail with a storage error
    pub async fn close(&self) {
        debug!("Closing call store pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl CallStore for SqliteCallStore {
    async fn create_schema(&self) -> Result<()> {
        debug!("Ensuring elevator table exists");

        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("create elevator table", e))?;

        Ok(())
    }

    async fn reset_schema(&self) -> Result<()> {
        debug!("Recreating elevator table");

        sqlx::query("DROP TABLE IF EXISTS elevator")
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("drop elevator table", e))?;

        self.create_schema().await
    }

    async fn insert(&self, call: NewCall) -> Result<()> {
        let call_datetime = call.call_datetime.unwrap_or_else(CallTimestamp::now);
        debug!(
            "Inserting call {} -> {} (current {}) at {}",
            call.demand_floor, call.destination_floor, call.current_floor, call_datetime
        );

        sqlx::query(
            r#"
            INSERT INTO elevator (current_floor, demand_floor, destination_floor, call_datetime)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(call.current_floor)
        .bind(call.demand_floor)
        .bind(call.destination_floor)
        .bind(call_datetime.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("insert call", e))?;

        Ok(())
    }

    async fn last_destination_floor(&self) -> Result<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT destination_floor
            FROM elevator
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("read last floor", e))
    }

    async fn get_all(&self) -> Result<Vec<CallRecord>> {
        let rows: Vec<CallRow> = sqlx::query_as::<_, CallRow>(
            r#"
            SELECT id, current_floor, demand_floor, destination_floor, call_datetime
            FROM elevator
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list calls", e))?;

        rows.into_iter().map(CallRecord::try_from).collect()
    }

    async fn row_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM elevator WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("check row", e))?;

        Ok(count > 0)
    }

    async fn update_field(&self, id: i64, field: CallField) -> Result<()> {
        debug!("Updating row {}: {}", id, field);

        let result = update_statement(id, field)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("update call", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::row_not_found(id));
        }

        Ok(())
    }

    async fn update_fields(&self, id: i64, fields: Vec<CallField>) -> Result<()> {
        debug!("Updating row {}: {} fields", id, fields.len());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin update", e))?;

        for field in fields {
            let result = update_statement(id, field)
                .execute(&mut *tx)
                .await
                .map_err(|e| storage_error("update call", e))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::row_not_found(id));
            }
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("commit update", e))
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM elevator")
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete calls", e))?;

        debug!("Deleted {} calls", result.rows_affected());
        Ok(result.rows_affected())
    }
}
