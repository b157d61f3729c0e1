//! Call registration use case

use crate::domain::call::{resolve_current_floor, CallStore, NewCall};
use crate::domain::shared::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Registers new calls, deriving the elevator's current floor from the log.
///
/// The service holds no floor state; every registration re-reads the store.
/// The read-last + insert pair runs under the write lock so two concurrent
/// registrations in this process cannot derive from the same previous call.
/// Share the lock with [`CallSeeder`](super::CallSeeder) so a reseed cannot
/// interleave with a registration.
pub struct CallService {
    store: Arc<dyn CallStore>,
    write_lock: Arc<Mutex<()>>,
}

impl CallService {
    pub fn new(store: Arc<dyn CallStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Lock held while the log is being appended to
    pub fn write_lock(&self) -> Arc<Mutex<()>> {
        self.write_lock.clone()
    }

    /// Record a call from `demand_floor` to `destination_floor`.
    ///
    /// Store errors are returned unchanged.
    pub async fn register_call(&self, demand_floor: i64, destination_floor: i64) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let last_floor = self.store.last_destination_floor().await?;
        let current_floor = resolve_current_floor(last_floor, demand_floor);
        debug!(
            "Registering call {} -> {} (elevator at {}, last destination {:?})",
            demand_floor, destination_floor, current_floor, last_floor
        );

        self.store
            .insert(NewCall::new(current_floor, demand_floor, destination_floor))
            .await
    }
}
