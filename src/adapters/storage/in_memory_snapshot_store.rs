//! In-Memory Snapshot Store Adapter
//!
//! Keeps session snapshots in a map. Used for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionSnapshot;
use crate::ports::{SnapshotStore, SnapshotStoreError};

/// In-memory storage for session snapshots
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshots: Arc<RwLock<HashMap<SessionId, SessionSnapshot>>>,
}

impl InMemorySnapshotStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored snapshots (useful for tests)
    pub async fn clear(&self) {
        self.snapshots.write().await.clear();
    }

    /// Get the number of stored snapshots
    pub async fn count(&self) -> usize {
        self.snapshots.read().await.len()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SnapshotStoreError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(snapshot.id, snapshot.clone());
        Ok(())
    }

    async fn load(&self, session_id: SessionId) -> Result<SessionSnapshot, SnapshotStoreError> {
        let snapshots = self.snapshots.read().await;
        snapshots
            .get(&session_id)
            .cloned()
            .ok_or(SnapshotStoreError::NotFound(session_id))
    }

    async fn exists(&self, session_id: SessionId) -> Result<bool, SnapshotStoreError> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.contains_key(&session_id))
    }

    async fn delete(&self, session_id: SessionId) -> Result<(), SnapshotStoreError> {
        self.snapshots.write().await.remove(&session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::test_support::two_by_two;
    use crate::domain::foundation::ApplicantTrack;
    use crate::domain::session::AssessmentSession;

    fn test_snapshot() -> SessionSnapshot {
        AssessmentSession::start(
            SessionId::new(),
            ApplicantTrack::Innovator,
            Arc::new(two_by_two()),
            false,
        )
        .to_snapshot()
    }

    #[tokio::test]
    async fn save_and_load_snapshot() {
        let store = InMemorySnapshotStore::new();
        let snapshot = test_snapshot();

        store.save(&snapshot).await.unwrap();
        let loaded = store.load(snapshot.id).await.unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn load_nonexistent_snapshot() {
        let store = InMemorySnapshotStore::new();
        let result = store.load(SessionId::new()).await;
        assert!(matches!(result, Err(SnapshotStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn exists_and_delete() {
        let store = InMemorySnapshotStore::new();
        let snapshot = test_snapshot();

        assert!(!store.exists(snapshot.id).await.unwrap());
        store.save(&snapshot).await.unwrap();
        assert!(store.exists(snapshot.id).await.unwrap());

        store.delete(snapshot.id).await.unwrap();
        assert!(!store.exists(snapshot.id).await.unwrap());
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let store = InMemorySnapshotStore::new();
        let clone = store.clone();

        store.save(&test_snapshot()).await.unwrap();
        store.save(&test_snapshot()).await.unwrap();

        assert_eq!(clone.count().await, 2);
        clone.clear().await;
        assert_eq!(store.count().await, 0);
    }
}
