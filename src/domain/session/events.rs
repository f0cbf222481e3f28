//! Assessment session domain events.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::Bucket;
use crate::domain::foundation::{ApplicantTrack, LapId, QuestionId, SessionId, Timestamp};

/// Events recorded by [`AssessmentSession`](super::AssessmentSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssessmentEvent {
    /// A new session was started.
    Started {
        session_id: SessionId,
        track: ApplicantTrack,
        started_at: Timestamp,
    },

    /// An answer was written, possibly overwriting an earlier one.
    AnswerRecorded {
        session_id: SessionId,
        question_id: QuestionId,
        score: u32,
        previous: Option<u32>,
    },

    /// Navigation moved past the last question of a lap.
    LapCompleted { session_id: SessionId, lap_id: LapId },

    /// The applicant jumped directly to a lap.
    NavigatedToLap {
        session_id: SessionId,
        lap_id: LapId,
        question_index: usize,
    },

    /// The assessment was submitted and scored.
    Submitted {
        session_id: SessionId,
        total_score: u32,
        bucket: Bucket,
        submitted_at: Timestamp,
    },
}

impl AssessmentEvent {
    /// Returns the session this event belongs to.
    pub fn session_id(&self) -> SessionId {
        match self {
            AssessmentEvent::Started { session_id, .. }
            | AssessmentEvent::AnswerRecorded { session_id, .. }
            | AssessmentEvent::LapCompleted { session_id, .. }
            | AssessmentEvent::NavigatedToLap { session_id, .. }
            | AssessmentEvent::Submitted { session_id, .. } => *session_id,
        }
    }

    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            AssessmentEvent::Started { .. } => "assessment.started",
            AssessmentEvent::AnswerRecorded { .. } => "assessment.answer_recorded",
            AssessmentEvent::LapCompleted { .. } => "assessment.lap_completed",
            AssessmentEvent::NavigatedToLap { .. } => "assessment.navigated_to_lap",
            AssessmentEvent::Submitted { .. } => "assessment.submitted",
        }
    }
}
