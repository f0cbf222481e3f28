//! SessionGateway - serialised load/apply/save access to assessment sessions.
//!
//! Every command runs as: lock the session, load its snapshot, apply one
//! aggregate operation, save the new snapshot, then log the drained events.
//! The per-session lock keeps two commands for the same session from
//! interleaving; different sessions never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::AssessmentCommandError;
use crate::domain::assessment::{AssessmentConfig, AssessmentError};
use crate::domain::foundation::{ApplicantTrack, SessionId};
use crate::domain::session::{AssessmentEvent, AssessmentSession};
use crate::ports::SnapshotStore;

type LockMap = HashMap<SessionId, Arc<Mutex<()>>>;

/// Shared access point for loading and mutating sessions.
#[derive(Clone)]
pub struct SessionGateway {
    store: Arc<dyn SnapshotStore>,
    catalog: Arc<AssessmentConfig>,
    locks: Arc<Mutex<LockMap>>,
    pause_between_laps: bool,
}

impl SessionGateway {
    pub fn new(store: Arc<dyn SnapshotStore>, catalog: Arc<AssessmentConfig>) -> Self {
        Self {
            store,
            catalog,
            locks: Arc::new(Mutex::new(HashMap::new())),
            pause_between_laps: false,
        }
    }

    /// Starts new sessions with a pause between laps.
    pub fn with_lap_transitions(mut self, enabled: bool) -> Self {
        self.pause_between_laps = enabled;
        self
    }

    /// The catalog every session runs against.
    pub fn catalog(&self) -> &Arc<AssessmentConfig> {
        &self.catalog
    }

    /// Creates and persists a new session.
    pub async fn create(
        &self,
        track: ApplicantTrack,
    ) -> Result<AssessmentSession, AssessmentCommandError> {
        let mut session = AssessmentSession::start(
            SessionId::new(),
            track,
            Arc::clone(&self.catalog),
            self.pause_between_laps,
        );
        self.persist(&mut session).await?;
        Ok(session)
    }

    /// Loads a session without taking its lock.
    pub async fn load(
        &self,
        session_id: SessionId,
    ) -> Result<AssessmentSession, AssessmentCommandError> {
        let snapshot = self.store.load(session_id).await?;
        Ok(AssessmentSession::from_snapshot(
            snapshot,
            Arc::clone(&self.catalog),
        )?)
    }

    /// Applies `operation` to a session under its lock and saves the result.
    ///
    /// Nothing is saved when the operation fails.
    pub async fn update<T, F>(
        &self,
        session_id: SessionId,
        operation: F,
    ) -> Result<(AssessmentSession, T), AssessmentCommandError>
    where
        F: FnOnce(&mut AssessmentSession) -> Result<T, AssessmentError>,
    {
        let _guard = self.lock(session_id).await;

        let mut session = self.load(session_id).await?;
        let value = operation(&mut session)?;
        self.persist(&mut session).await?;

        Ok((session, value))
    }

    /// Removes a session under its lock.
    pub async fn delete(&self, session_id: SessionId) -> Result<(), AssessmentCommandError> {
        let _guard = self.lock(session_id).await;

        if !self.store.exists(session_id).await? {
            return Err(AssessmentCommandError::SessionNotFound(session_id));
        }
        self.store.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "Assessment deleted");
        Ok(())
    }

    async fn lock(&self, session_id: SessionId) -> OwnedMutexGuard<()> {
        let session_lock = {
            let mut locks = self.locks.lock().await;
            // Drop locks nobody holds or waits on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(session_id).or_default())
        };
        session_lock.lock_owned().await
    }

    async fn persist(&self, session: &mut AssessmentSession) -> Result<(), AssessmentCommandError> {
        self.store.save(&session.to_snapshot()).await?;
        for event in session.take_events() {
            log_event(&event);
        }
        Ok(())
    }
}

fn log_event(event: &AssessmentEvent) {
    match event {
        AssessmentEvent::Started {
            session_id, track, ..
        } => {
            tracing::info!(session_id = %session_id, track = %track, "Assessment started");
        }
        AssessmentEvent::AnswerRecorded {
            session_id,
            question_id,
            score,
            previous,
        } => {
            tracing::debug!(
                session_id = %session_id,
                question_id = %question_id,
                score,
                overwritten = previous.is_some(),
                "Answer recorded"
            );
        }
        AssessmentEvent::LapCompleted { session_id, lap_id } => {
            tracing::info!(session_id = %session_id, lap_id = %lap_id, "Lap completed");
        }
        AssessmentEvent::NavigatedToLap {
            session_id,
            lap_id,
            question_index,
        } => {
            tracing::debug!(
                session_id = %session_id,
                lap_id = %lap_id,
                question_index,
                "Navigated to lap"
            );
        }
        AssessmentEvent::Submitted {
            session_id,
            total_score,
            bucket,
            ..
        } => {
            tracing::info!(
                session_id = %session_id,
                total_score,
                bucket = %bucket,
                "Assessment submitted"
            );
        }
    }
}
