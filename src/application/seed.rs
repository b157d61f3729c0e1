//! Bulk loading of recorded elevator travels

use crate::domain::call::{CallStore, NewCall};
use crate::domain::shared::{DomainError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Rebuilds the call log from a JSON file of recorded travels.
///
/// The file holds an array of
/// `{current_floor, demand_floor, destination_floor, call_datetime?}` objects.
/// Travels are stored verbatim; the floor-derivation rule is not applied.
pub struct CallSeeder {
    store: Arc<dyn CallStore>,
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CallSeeder {
    pub fn new(store: Arc<dyn CallStore>, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Hold `lock` while the table is reset and refilled
    pub fn with_write_lock(mut self, lock: Arc<Mutex<()>>) -> Self {
        self.write_lock = lock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reset the table and load every travel from the seed file.
    ///
    /// The file is parsed before anything is dropped, so a malformed file
    /// leaves the current log untouched. A missing file yields an empty log.
    pub async fn reseed(&self) -> Result<usize> {
        let travels = self.read_travels().await?;

        let _guard = self.write_lock.lock().await;
        self.store.reset_schema().await?;
        let count = travels.len();
        for travel in travels {
            self.store.insert(travel).await?;
        }

        info!("Seeded {} calls from {}", count, self.path.display());
        Ok(count)
    }

    async fn read_travels(&self) -> Result<Vec<NewCall>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Seed file not found: {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read seed file {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        parse_travels(&raw).map_err(|e| {
            DomainError::validation(format!(
                "Invalid seed file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

fn parse_travels(raw: &str) -> std::result::Result<Vec<NewCall>, serde_json::Error> {
    serde_json::from_str(raw)
}
