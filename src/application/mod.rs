//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate sessions through the snapshot store; query handlers
//! only read.

pub mod handlers;

pub use handlers::assessment::{
    AnswerInput, AssessmentCommandError, GetAssessmentHandler, GetAssessmentQuery,
    GetProgressHandler, GetProgressQuery, NavigateAssessmentCommand, NavigateAssessmentHandler,
    NavigationAction, RecordAnswerCommand, RecordAnswerHandler, ScoreAnswersHandler,
    ScoreAnswersQuery, SessionGateway, StartAssessmentCommand, StartAssessmentHandler,
    SubmitAssessmentCommand, SubmitAssessmentHandler,
};
