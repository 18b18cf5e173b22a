//! Availability status repository over `status.json` (single record).

use crate::models::Status;
use crate::storage::{Store, StoreError};

const STATUS_FILE: &str = "status.json";

/// Get the stored status, or None if one was never saved.
pub async fn get(store: &Store) -> Result<Option<Status>, StoreError> {
    store.read(STATUS_FILE).await
}

/// Replace the stored status.
pub async fn upsert(store: &Store, status: &Status) -> Result<(), StoreError> {
    let _guard = store.lock_for_update().await;
    store.write_file(STATUS_FILE, status).await
}
