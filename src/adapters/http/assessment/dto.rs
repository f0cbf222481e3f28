//! HTTP DTOs for assessment endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{
    AnswerOption, AnswerSheet, AssessmentConfig, AssessmentResult, Bucket, DimensionScore, Lap,
    NavigationState, Progress, Question, RecordedAnswer,
};
use crate::domain::foundation::{
    ApplicantTrack, DomainError, LapId, OptionId, QuestionId, SessionStatus,
};
use crate::domain::session::AssessmentSession;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a new assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct StartAssessmentRequest {
    pub track: ApplicantTrack,
}

/// Request to answer the active question, by option or by raw score.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerRequest {
    ByOption {
        option_id: OptionId,
    },
    ByScore {
        question_id: QuestionId,
        score: u32,
        #[serde(default = "advance_by_default")]
        advance: bool,
    },
}

fn advance_by_default() -> bool {
    true
}

/// Query parameters for progress.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressQueryParams {
    #[serde(default)]
    pub lap_id: Option<String>,
}

/// Request to score an answer sheet without a session.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub answers: AnswerSheet,
}

// ════════════════════════════════════════════════════════════════════════════
// Catalog DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct OptionResponse {
    pub id: String,
    pub text: String,
    pub score: u32,
}

impl From<&AnswerOption> for OptionResponse {
    fn from(option: &AnswerOption) -> Self {
        Self {
            id: option.id.to_string(),
            text: option.text.clone(),
            score: option.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub text: String,
    pub options: Vec<OptionResponse>,
}

impl From<&Question> for QuestionResponse {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.to_string(),
            text: question.text.clone(),
            options: question.options.iter().map(Into::into).collect(),
        }
    }
}

/// A lap without its questions, for transition screens.
#[derive(Debug, Clone, Serialize)]
pub struct LapSummaryResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub question_count: usize,
}

impl From<&Lap> for LapSummaryResponse {
    fn from(lap: &Lap) -> Self {
        Self {
            id: lap.id.to_string(),
            title: lap.title.clone(),
            description: lap.description.clone(),
            question_count: lap.question_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LapResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub max_score: u32,
    pub questions: Vec<QuestionResponse>,
}

impl From<&Lap> for LapResponse {
    fn from(lap: &Lap) -> Self {
        Self {
            id: lap.id.to_string(),
            title: lap.title.clone(),
            description: lap.description.clone(),
            max_score: lap.max_score(),
            questions: lap.questions.iter().map(Into::into).collect(),
        }
    }
}

/// The full lap catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub lap_count: usize,
    pub question_count: usize,
    pub max_score: u32,
    pub laps: Vec<LapResponse>,
}

impl From<&AssessmentConfig> for CatalogResponse {
    fn from(config: &AssessmentConfig) -> Self {
        Self {
            lap_count: config.lap_count(),
            question_count: config.question_count(),
            max_score: config.max_score(),
            laps: config.laps().iter().map(Into::into).collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Answered/total counts.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lap_id: Option<String>,
    pub answered: usize,
    pub total: usize,
    pub remaining: usize,
    pub percent: u8,
    pub is_complete: bool,
}

impl ProgressResponse {
    pub fn new(lap_id: Option<&LapId>, progress: Progress) -> Self {
        Self {
            lap_id: lap_id.map(ToString::to_string),
            answered: progress.answered,
            total: progress.total,
            remaining: progress.remaining(),
            percent: progress.percent().value(),
            is_complete: progress.is_complete(),
        }
    }
}

/// Active position with "Q n of m" numbering.
#[derive(Debug, Clone, Serialize)]
pub struct PositionResponse {
    pub lap_id: String,
    pub lap_title: String,
    pub question_index: usize,
    pub question_number: usize,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionScoreResponse {
    pub lap_id: String,
    pub title: String,
    pub score: u32,
    pub max_score: u32,
    pub is_low: bool,
}

impl From<&DimensionScore> for DimensionScoreResponse {
    fn from(d: &DimensionScore) -> Self {
        Self {
            lap_id: d.lap_id.to_string(),
            title: d.title.clone(),
            score: d.score,
            max_score: d.max_score,
            is_low: d.is_low,
        }
    }
}

/// Scoring result.
#[derive(Debug, Clone, Serialize)]
pub struct ResultResponse {
    pub total_score: u32,
    pub bucket: Bucket,
    pub dimension_scores: Vec<DimensionScoreResponse>,
    pub low_dimensions: Vec<String>,
}

impl From<&AssessmentResult> for ResultResponse {
    fn from(result: &AssessmentResult) -> Self {
        Self {
            total_score: result.total_score(),
            bucket: result.bucket(),
            dimension_scores: result.dimension_scores().iter().map(Into::into).collect(),
            low_dimensions: result.low_dimensions().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Detailed session view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub track: ApplicantTrack,
    pub status: SessionStatus,
    pub navigation: NavigationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming_lap: Option<LapSummaryResponse>,
    pub progress: ProgressResponse,
    pub answers: AnswerSheet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&AssessmentSession> for SessionResponse {
    fn from(session: &AssessmentSession) -> Self {
        let navigator = session.navigator();
        let position = navigator
            .current_position()
            .zip(navigator.current_lap())
            .map(|(pos, lap)| PositionResponse {
                lap_id: pos.lap_id.to_string(),
                lap_title: lap.title.clone(),
                question_index: pos.question_index,
                question_number: pos.question_number(),
                question_count: lap.question_count(),
            });
        let overall = Progress::new(
            navigator.answers().len(),
            navigator.config().question_count(),
        );

        Self {
            id: session.id().to_string(),
            track: session.track(),
            status: session.status(),
            navigation: navigator.state(),
            position,
            current_question: navigator.current_question().map(Into::into),
            upcoming_lap: navigator.upcoming_lap().map(Into::into),
            progress: ProgressResponse::new(None, overall),
            answers: navigator.answers().clone(),
            result: session.result().map(Into::into),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordedAnswerResponse {
    pub question_id: String,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<u32>,
}

impl From<&RecordedAnswer> for RecordedAnswerResponse {
    fn from(recorded: &RecordedAnswer) -> Self {
        Self {
            question_id: recorded.question_id.to_string(),
            score: recorded.score,
            previous: recorded.previous,
        }
    }
}

/// Response to an answer command.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub recorded: RecordedAnswerResponse,
    pub session: SessionResponse,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(error: DomainError) -> Self {
        let response = Self::new(error.code, error.message);
        if error.details.is_empty() {
            return response;
        }
        let details: serde_json::Map<String, serde_json::Value> = error
            .details
            .into_iter()
            .map(|(key, value)| (key, serde_json::Value::String(value)))
            .collect();
        response.with_details(serde_json::Value::Object(details))
    }
}
