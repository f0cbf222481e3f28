//! SessionStatus enum for tracking the lifecycle of an assessment session.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Submitted,
}

impl SessionStatus {
    /// Returns true if answers and navigation may still change.
    pub fn is_mutable(&self) -> bool {
        matches!(self, SessionStatus::InProgress)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!((self, target), (InProgress, Submitted))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            InProgress => vec![Submitted],
            Submitted => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::InProgress => "In Progress",
            SessionStatus::Submitted => "Submitted",
        };
        write!(f, "{}", s)
    }
}
