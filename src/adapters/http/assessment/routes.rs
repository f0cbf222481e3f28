//! HTTP routes for assessment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    advance, delete_assessment, get_assessment, get_catalog, get_progress, jump_to_lap,
    record_answer, retreat, score_answers, start_assessment, submit_assessment,
    AssessmentHandlers,
};

/// Creates the assessment router, to be nested under `/api/assessment`.
pub fn assessment_routes(handlers: AssessmentHandlers) -> Router {
    Router::new()
        .route("/laps", get(get_catalog))
        .route("/score", post(score_answers))
        .route("/sessions", post(start_assessment))
        .route("/sessions/:id", get(get_assessment).delete(delete_assessment))
        .route("/sessions/:id/progress", get(get_progress))
        .route("/sessions/:id/answers", post(record_answer))
        .route("/sessions/:id/advance", post(advance))
        .route("/sessions/:id/retreat", post(retreat))
        .route("/sessions/:id/laps/:lap_id/jump", post(jump_to_lap))
        .route("/sessions/:id/submit", post(submit_assessment))
        .with_state(handlers)
}
