//! Snapshot Store Port - Interface for persisting assessment sessions.
//!
//! Sessions are loaded at the start of every command and saved after every
//! mutation, so implementations only need whole-snapshot reads and writes.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionSnapshot;

/// Errors that can occur during snapshot storage operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    #[error("Snapshot not found for session: {0}")]
    NotFound(SessionId),

    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize snapshot: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading session snapshots
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Save a snapshot, replacing any earlier one for the same session
    ///
    /// # Errors
    /// Returns `SnapshotStoreError` if save fails
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SnapshotStoreError>;

    /// Load the latest snapshot for a session
    ///
    /// # Errors
    /// Returns `SnapshotStoreError::NotFound` if no snapshot exists
    async fn load(&self, session_id: SessionId) -> Result<SessionSnapshot, SnapshotStoreError>;

    /// Check if a snapshot exists for a session
    async fn exists(&self, session_id: SessionId) -> Result<bool, SnapshotStoreError>;

    /// Delete the snapshot for a session. Deleting a missing snapshot is not
    /// an error.
    async fn delete(&self, session_id: SessionId) -> Result<(), SnapshotStoreError>;
}
