//! AssessmentSession aggregate.
//!
//! One session owns one navigator. Every mutation goes through the aggregate
//! so the status check, the timestamps and the event log stay consistent.
//!
//! # Invariants
//!
//! - A `Submitted` session always carries the result it was scored with
//! - A `Submitted` session accepts no further answers or navigation
//! - The stored result is an immutable snapshot; the answer sheet stays the
//!   source of truth for everything else

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::AssessmentEvent;
use crate::domain::assessment::{
    AnswerSheet, AssessmentConfig, AssessmentError, AssessmentNavigator, AssessmentResult,
    NavigationState, Position, Progress, RecordedAnswer,
};
use crate::domain::foundation::{
    ApplicantTrack, LapId, OptionId, QuestionId, SessionId, SessionStatus, StateMachine, Timestamp,
};

/// Persisted form of a session.
///
/// The catalog is not part of the snapshot; it is supplied again when the
/// session is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub track: ApplicantTrack,
    pub status: SessionStatus,
    pub navigation: NavigationState,
    pub answers: AnswerSheet,
    #[serde(default)]
    pub pause_between_laps: bool,
    #[serde(default)]
    pub result: Option<AssessmentResult>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A single applicant's run through the assessment.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    id: SessionId,
    track: ApplicantTrack,
    status: SessionStatus,
    navigator: AssessmentNavigator,
    result: Option<AssessmentResult>,
    created_at: Timestamp,
    updated_at: Timestamp,
    domain_events: Vec<AssessmentEvent>,
}

impl AssessmentSession {
    /// Starts a new session at the first question.
    pub fn start(
        id: SessionId,
        track: ApplicantTrack,
        config: Arc<AssessmentConfig>,
        pause_between_laps: bool,
    ) -> Self {
        let now = Timestamp::now();
        let mut session = Self {
            id,
            track,
            status: SessionStatus::InProgress,
            navigator: AssessmentNavigator::new(config).with_lap_transitions(pause_between_laps),
            result: None,
            created_at: now,
            updated_at: now,
            domain_events: Vec::new(),
        };

        session.record_event(AssessmentEvent::Started {
            session_id: id,
            track,
            started_at: now,
        });

        session
    }

    /// Rebuilds a session from a snapshot (no events).
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the snapshot does not fit the catalog
    /// - `InvalidState` if a submitted snapshot has no result
    pub fn from_snapshot(
        snapshot: SessionSnapshot,
        config: Arc<AssessmentConfig>,
    ) -> Result<Self, AssessmentError> {
        if snapshot.status == SessionStatus::Submitted && snapshot.result.is_none() {
            return Err(AssessmentError::invalid_state(format!(
                "session {} is submitted but has no result",
                snapshot.id
            )));
        }

        let navigator = AssessmentNavigator::restore(
            config,
            &snapshot.navigation,
            snapshot.answers,
            snapshot.pause_between_laps,
        )?;

        Ok(Self {
            id: snapshot.id,
            track: snapshot.track,
            status: snapshot.status,
            navigator,
            result: snapshot.result,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            domain_events: Vec::new(),
        })
    }

    /// Captures the persisted form of this session.
    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            track: self.track,
            status: self.status,
            navigation: self.navigator.state(),
            answers: self.navigator.answers().clone(),
            pause_between_laps: self.navigator.lap_transitions_enabled(),
            result: self.result.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn track(&self) -> ApplicantTrack {
        self.track
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_submitted(&self) -> bool {
        self.status == SessionStatus::Submitted
    }

    /// Read access to the underlying navigator.
    pub fn navigator(&self) -> &AssessmentNavigator {
        &self.navigator
    }

    /// The result stored at submission.
    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn progress(&self, lap_id: Option<&LapId>) -> Result<Progress, AssessmentError> {
        self.navigator.progress(lap_id)
    }

    /// Takes and clears pending domain events.
    pub fn take_events(&mut self) -> Vec<AssessmentEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Answers
    // ───────────────────────────────────────────────────────────────

    /// Records a score for the active question without moving on.
    pub fn record_answer(
        &mut self,
        question_id: &QuestionId,
        score: u32,
    ) -> Result<RecordedAnswer, AssessmentError> {
        self.ensure_mutable()?;
        let recorded = self.navigator.record_answer(question_id, score)?;
        self.on_answer(&recorded);
        Ok(recorded)
    }

    /// Records the chosen option of the active question and advances.
    pub fn select_option(
        &mut self,
        option_id: &OptionId,
    ) -> Result<RecordedAnswer, AssessmentError> {
        self.ensure_mutable()?;
        let recorded = self.navigator.select_option(option_id)?;
        self.on_answer(&recorded);
        self.step(AssessmentNavigator::advance);
        Ok(recorded)
    }

    fn on_answer(&mut self, recorded: &RecordedAnswer) {
        self.record_event(AssessmentEvent::AnswerRecorded {
            session_id: self.id,
            question_id: recorded.question_id.clone(),
            score: recorded.score,
            previous: recorded.previous,
        });
        self.touch();
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Moves one step forward.
    pub fn advance(&mut self) -> Result<NavigationState, AssessmentError> {
        self.ensure_mutable()?;
        Ok(self.step(AssessmentNavigator::advance))
    }

    /// Moves one step back.
    pub fn retreat(&mut self) -> Result<NavigationState, AssessmentError> {
        self.ensure_mutable()?;
        Ok(self.step(AssessmentNavigator::retreat))
    }

    /// Jumps to the first unanswered question of a lap.
    pub fn jump_to_lap(&mut self, lap_id: &LapId) -> Result<Position, AssessmentError> {
        self.ensure_mutable()?;
        let position = self.navigator.jump_to_lap(lap_id)?;
        self.record_event(AssessmentEvent::NavigatedToLap {
            session_id: self.id,
            lap_id: position.lap_id.clone(),
            question_index: position.question_index,
        });
        self.touch();
        Ok(position)
    }

    /// Applies a navigation step and records `LapCompleted` when it leaves the
    /// last question of a lap going forward.
    fn step(&mut self, motion: fn(&mut AssessmentNavigator) -> NavigationState) -> NavigationState {
        let before = self.navigator.state();
        let after = motion(&mut self.navigator);

        if let NavigationState::InProgress {
            lap_id: from_lap, ..
        } = &before
        {
            let left_forward = match &after {
                NavigationState::InProgress { lap_id, .. } => self
                    .navigator
                    .config()
                    .lap_index(lap_id)
                    .zip(self.navigator.config().lap_index(from_lap))
                    .is_some_and(|(to, from)| to > from),
                NavigationState::LapTransition { .. } | NavigationState::Finished => true,
            };
            if left_forward {
                self.record_event(AssessmentEvent::LapCompleted {
                    session_id: self.id,
                    lap_id: from_lap.clone(),
                });
            }
        }

        if before != after {
            self.touch();
        }
        after
    }

    // ───────────────────────────────────────────────────────────────
    // Submission
    // ───────────────────────────────────────────────────────────────

    /// Scores the assessment and closes the session.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if already submitted
    /// - `PreconditionNotMet` if any question is unanswered
    pub fn submit(&mut self) -> Result<&AssessmentResult, AssessmentError> {
        self.ensure_mutable()?;

        if !self.navigator.is_complete() {
            let progress = self.navigator.progress(None)?;
            return Err(AssessmentError::precondition_not_met(format!(
                "{} of {} questions answered",
                progress.answered, progress.total
            )));
        }

        let status = self
            .status
            .transition_to(SessionStatus::Submitted)
            .map_err(|e| AssessmentError::invalid_state(e.to_string()))?;

        let result = self.navigator.result();
        let now = Timestamp::now();
        self.navigator.finish();
        self.status = status;
        self.updated_at = now;

        self.record_event(AssessmentEvent::Submitted {
            session_id: self.id,
            total_score: result.total_score(),
            bucket: result.bucket(),
            submitted_at: now,
        });

        Ok(self.result.insert(result))
    }

    fn ensure_mutable(&self) -> Result<(), AssessmentError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(AssessmentError::invalid_state(format!(
                "session {} is already {}",
                self.id,
                self.status.to_string().to_lowercase()
            )))
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn record_event(&mut self, event: AssessmentEvent) {
        self.domain_events.push(event);
    }
}
