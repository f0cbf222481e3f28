//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and error
//! types that form the vocabulary of the assessment domain.

mod applicant_track;
mod errors;
mod ids;
mod percentage;
mod session_status;
mod state_machine;
mod timestamp;

pub use applicant_track::ApplicantTrack;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{LapId, OptionId, QuestionId, SessionId};
pub use percentage::Percentage;
pub use session_status::SessionStatus;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
