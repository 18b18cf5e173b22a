//! JSON file storage layer for projects, skills, profile, and status.
//!
//! File layout under the data directory:
//! - `projects.json` — array of projects
//! - `skills.json` — array of skills
//! - `profile.json` — single profile object
//! - `status.json` — single status object
//!
//! Writes are atomic (temp file + rename) so a crash mid-write never leaves
//! a truncated file. A single RwLock serializes read-modify-write cycles;
//! plain reads share the lock.

pub mod profile;
pub mod projects;
pub mod skills;
pub mod status;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{RwLock, RwLockWriteGuard};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Handle to the on-disk JSON store. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    dir: Arc<PathBuf>,
    lock: Arc<RwLock<()>>,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Store {
            dir: Arc::new(dir.into()),
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Create the data directory if it doesn't exist.
    pub async fn init(&self) -> Result<(), StoreError> {
        fs::create_dir_all(self.dir.as_ref()).await?;
        Ok(())
    }

    /// Read and deserialize a collection file. Missing file reads as None.
    pub async fn read<T>(&self, file: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let _guard = self.lock.read().await;
        self.read_file(file).await
    }

    /// Acquire the write lock for a read-modify-write cycle. Hold the guard
    /// across `read_file` + `write_file` so concurrent mutations cannot
    /// interleave.
    pub(crate) async fn lock_for_update(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().await
    }

    /// Read without taking the lock. Only call while holding a guard from
    /// `lock_for_update` (or via `read`).
    pub(crate) async fn read_file<T>(&self, file: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = self.dir.join(file);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Serialize and write a collection file atomically (temp + rename).
    /// Only call while holding a guard from `lock_for_update`.
    pub(crate) async fn write_file<T>(&self, file: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let path = self.dir.join(file);
        let json = serde_json::to_vec_pretty(value)?;

        let temp_path = path.with_extension("tmp");
        let mut f = fs::File::create(&temp_path).await?;
        f.write_all(&json).await?;
        f.sync_all().await?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, &path).await?;

        Ok(())
    }
}
