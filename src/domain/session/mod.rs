//! Session module - one applicant's run through the assessment.
//!
//! # Events
//!
//! - `Started` - A new session was started
//! - `AnswerRecorded` - An answer was written or overwritten
//! - `LapCompleted` - Navigation moved past the end of a lap
//! - `NavigatedToLap` - The applicant jumped to a lap
//! - `Submitted` - The assessment was scored and closed

mod aggregate;
mod events;

pub use aggregate::{AssessmentSession, SessionSnapshot};
pub use events::AssessmentEvent;
