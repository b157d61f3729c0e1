#![allow(dead_code)]

use liftlog::domain::call::CallStore;
use liftlog::infrastructure::persistence::{create_pool, DatabaseConfig, SqliteCallStore};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// In-memory SQLite store with the table already created
pub async fn memory_store() -> Arc<SqliteCallStore> {
    let pool = create_pool(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");
    let store = Arc::new(SqliteCallStore::new(pool));
    store.create_schema().await.expect("Failed to create schema");
    store
}

pub struct TestDb {
    _dir: TempDir, // keep alive for the life of the test
    pub path: PathBuf,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("elevator.db");
        Self { _dir: dir, path }
    }

    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: format!("sqlite://{}", self.path.display()),
            ..Default::default()
        }
    }

    pub async fn open(&self) -> SqliteCallStore {
        let pool = create_pool(&self.config()).await.expect("connect");
        SqliteCallStore::new(pool)
    }
}

/// Column names of the elevator table in declaration order
pub async fn column_names(pool: &SqlitePool) -> Vec<String> {
    sqlx::query_scalar("SELECT name FROM pragma_table_info('elevator') ORDER BY cid")
        .fetch_all(pool)
        .await
        .expect("table_info")
}

/// Number of tables named `elevator`
pub async fn elevator_table_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'elevator'")
        .fetch_one(pool)
        .await
        .expect("sqlite_master")
}

pub const COLUMNS: [&str; 5] = [
    "id",
    "current_floor",
    "demand_floor",
    "destination_floor",
    "call_datetime",
];
