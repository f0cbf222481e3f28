//! Navigation state of an assessment: where the applicant currently is.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LapId, StateMachine};

/// Observable navigation state.
///
/// `InProgress` always references a catalog lap and an in-range question
/// index. `LapTransition` is the optional pause shown between two laps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NavigationState {
    InProgress { lap_id: LapId, question_index: usize },
    LapTransition { from: LapId, to: LapId },
    Finished,
}

impl NavigationState {
    /// Returns the phase of this state.
    pub fn phase(&self) -> NavigationPhase {
        match self {
            NavigationState::InProgress { .. } => NavigationPhase::InProgress,
            NavigationState::LapTransition { .. } => NavigationPhase::LapTransition,
            NavigationState::Finished => NavigationPhase::Finished,
        }
    }

    /// Returns the active position while a question is on screen.
    pub fn position(&self) -> Option<Position> {
        match self {
            NavigationState::InProgress {
                lap_id,
                question_index,
            } => Some(Position {
                lap_id: lap_id.clone(),
                question_index: *question_index,
            }),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, NavigationState::Finished)
    }
}

/// Payload-free phase of a [`NavigationState`], used to validate moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationPhase {
    InProgress,
    LapTransition,
    Finished,
}

impl StateMachine for NavigationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use NavigationPhase::*;
        matches!(
            (self, target),
            (InProgress, InProgress)
                | (InProgress, LapTransition)
                | (InProgress, Finished)
                | (LapTransition, InProgress)
                | (LapTransition, Finished)
                // Retreat or jump back from the end to review answers.
                | (Finished, InProgress)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use NavigationPhase::*;
        match self {
            InProgress => vec![InProgress, LapTransition, Finished],
            LapTransition => vec![InProgress, Finished],
            Finished => vec![InProgress],
        }
    }
}

/// The active lap and question index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub lap_id: LapId,
    pub question_index: usize,
}

impl Position {
    /// One-based question number for "Q n of m" displays.
    pub fn question_number(&self) -> usize {
        self.question_index + 1
    }
}
