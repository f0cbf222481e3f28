//! Error type shared by the assessment command and query handlers.

use thiserror::Error;

use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::SnapshotStoreError;

/// Errors returned by assessment handlers.
#[derive(Debug, Error)]
pub enum AssessmentCommandError {
    /// No snapshot exists for the session.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The domain rejected the operation.
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    /// The snapshot store failed.
    #[error("Storage error: {0}")]
    Storage(SnapshotStoreError),
}

impl AssessmentCommandError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentCommandError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            AssessmentCommandError::Assessment(err) => err.code(),
            AssessmentCommandError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

impl From<SnapshotStoreError> for AssessmentCommandError {
    fn from(err: SnapshotStoreError) -> Self {
        match err {
            SnapshotStoreError::NotFound(id) => AssessmentCommandError::SessionNotFound(id),
            other => AssessmentCommandError::Storage(other),
        }
    }
}

impl From<AssessmentCommandError> for DomainError {
    fn from(err: AssessmentCommandError) -> Self {
        match err {
            AssessmentCommandError::Assessment(inner) => inner.into(),
            AssessmentCommandError::SessionNotFound(id) => {
                DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
                    .with_detail("session_id", id.to_string())
            }
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
