//! Assessment command and query handlers.
//!
//! Commands go through [`SessionGateway`], which serialises work per session
//! and persists a snapshot after every successful mutation.

mod errors;
mod session_gateway;

// Command handlers
mod delete_assessment;
mod navigate;
mod record_answer;
mod start_assessment;
mod submit_assessment;

// Query handlers
mod get_assessment;
mod score_answers;

pub use errors::AssessmentCommandError;
pub use session_gateway::SessionGateway;

pub use delete_assessment::{DeleteAssessmentCommand, DeleteAssessmentHandler};
pub use get_assessment::{
    GetAssessmentHandler, GetAssessmentQuery, GetProgressHandler, GetProgressQuery,
};
pub use navigate::{
    NavigateAssessmentCommand, NavigateAssessmentHandler, NavigateAssessmentResult,
    NavigationAction,
};
pub use record_answer::{AnswerInput, RecordAnswerCommand, RecordAnswerHandler, RecordAnswerResult};
pub use score_answers::{ScoreAnswersHandler, ScoreAnswersQuery};
pub use start_assessment::{StartAssessmentCommand, StartAssessmentHandler};
pub use submit_assessment::{
    SubmitAssessmentCommand, SubmitAssessmentHandler, SubmitAssessmentResult,
};
