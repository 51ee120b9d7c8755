///! Per-user state: caught creatures and saved hemisphere
///!
///! The service talks to storage through these traits; `JsonFileStore` is the
///! bundled implementation.

use async_trait::async_trait;
use finder_common::{CaptureRecord, CaptureSnapshot, Hemisphere};
use thiserror::Error;

mod json_store;
pub use json_store::JsonFileStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait CaptureStore: Send + Sync {
    /// Read-only view of what `user_id` has caught, taken at call time.
    async fn caught_snapshot(&self, user_id: &str) -> Result<CaptureSnapshot, StorageError>;

    async fn records(&self, user_id: &str) -> Result<Vec<CaptureRecord>, StorageError>;

    async fn mark_caught(&self, user_id: &str, fish_id: &str) -> Result<(), StorageError>;

    /// Removes the record; absent means not caught.
    async fn clear_caught(&self, user_id: &str, fish_id: &str) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `None` until the user picks a hemisphere.
    async fn hemisphere(&self, user_id: &str) -> Result<Option<Hemisphere>, StorageError>;

    async fn set_hemisphere(&self, user_id: &str, hemisphere: Hemisphere)
        -> Result<(), StorageError>;
}
