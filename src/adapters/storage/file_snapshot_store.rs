//! File-based Snapshot Store Adapter
//!
//! Stores each session snapshot as a YAML file named after the session id.
//! Writes go to a temporary file first and are renamed into place, so a
//! reader never sees a half-written snapshot.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionSnapshot;
use crate::ports::{SnapshotStore, SnapshotStoreError};

/// File-based storage for session snapshots
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    base_path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSnapshotStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the snapshot file path for a session
    fn snapshot_path(&self, session_id: SessionId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", session_id))
    }

    fn temp_path(&self, session_id: SessionId) -> PathBuf {
        self.base_path.join(format!(".{}.yaml.tmp", session_id))
    }

    async fn ensure_dir(&self) -> Result<(), SnapshotStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SnapshotStoreError::IoError(e.to_string()))
    }

    async fn file_exists(path: &Path) -> Result<bool, SnapshotStoreError> {
        fs::try_exists(path)
            .await
            .map_err(|e| SnapshotStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SnapshotStoreError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(snapshot)
            .map_err(|e| SnapshotStoreError::SerializationFailed(e.to_string()))?;

        let temp_path = self.temp_path(snapshot.id);
        fs::write(&temp_path, yaml)
            .await
            .map_err(|e| SnapshotStoreError::IoError(e.to_string()))?;
        fs::rename(&temp_path, self.snapshot_path(snapshot.id))
            .await
            .map_err(|e| SnapshotStoreError::IoError(e.to_string()))?;

        tracing::debug!(session_id = %snapshot.id, "Snapshot written");
        Ok(())
    }

    async fn load(&self, session_id: SessionId) -> Result<SessionSnapshot, SnapshotStoreError> {
        let file_path = self.snapshot_path(session_id);

        if !Self::file_exists(&file_path).await? {
            return Err(SnapshotStoreError::NotFound(session_id));
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| SnapshotStoreError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml)
            .map_err(|e| SnapshotStoreError::DeserializationFailed(e.to_string()))
    }

    async fn exists(&self, session_id: SessionId) -> Result<bool, SnapshotStoreError> {
        Self::file_exists(&self.snapshot_path(session_id)).await
    }

    async fn delete(&self, session_id: SessionId) -> Result<(), SnapshotStoreError> {
        let file_path = self.snapshot_path(session_id);

        if Self::file_exists(&file_path).await? {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| SnapshotStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}
