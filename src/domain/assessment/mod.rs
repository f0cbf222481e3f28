//! Assessment module - lap catalog, navigation state machine and scoring.
//!
//! The navigator records answers one question at a time and moves through the
//! laps; the scoring engine turns an answer sheet into dimension scores, a
//! total and a GREEN/YELLOW/RED bucket.

mod answers;
mod catalog;
mod errors;
mod navigation;
mod navigator;
mod progress;
mod scoring;

pub use answers::AnswerSheet;
pub use catalog::{AnswerOption, AssessmentConfig, CatalogError, Lap, Question};
pub use errors::AssessmentError;
pub use navigation::{NavigationPhase, NavigationState, Position};
pub use navigator::{AssessmentNavigator, RecordedAnswer};
pub use progress::Progress;
pub use scoring::{
    AssessmentResult, Bucket, DimensionScore, ScoringEngine, GREEN_TOTAL_THRESHOLD,
    LOW_DIMENSION_THRESHOLD, RED_LOW_DIMENSION_COUNT, RED_TOTAL_THRESHOLD,
};

#[cfg(test)]
pub(crate) use catalog::test_support;
