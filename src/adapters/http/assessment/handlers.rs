//! HTTP handlers for assessment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::assessment::{
    AnswerInput, AssessmentCommandError, DeleteAssessmentCommand, DeleteAssessmentHandler,
    GetAssessmentHandler, GetAssessmentQuery,
    GetProgressHandler, GetProgressQuery, NavigateAssessmentCommand, NavigateAssessmentHandler,
    NavigationAction, RecordAnswerCommand, RecordAnswerHandler, ScoreAnswersHandler,
    ScoreAnswersQuery, SessionGateway, StartAssessmentCommand, StartAssessmentHandler,
    SubmitAssessmentCommand, SubmitAssessmentHandler,
};
use crate::domain::assessment::{AssessmentConfig, AssessmentError};
use crate::domain::foundation::{DomainError, ErrorCode, LapId, SessionId};

use super::dto::{
    AnswerRequest, AnswerResponse, CatalogResponse, ErrorResponse, HealthResponse,
    ProgressQueryParams, ProgressResponse, RecordedAnswerResponse, ResultResponse, ScoreRequest,
    SessionResponse, StartAssessmentRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssessmentHandlers {
    catalog: Arc<AssessmentConfig>,
    start_handler: Arc<StartAssessmentHandler>,
    get_handler: Arc<GetAssessmentHandler>,
    progress_handler: Arc<GetProgressHandler>,
    answer_handler: Arc<RecordAnswerHandler>,
    navigate_handler: Arc<NavigateAssessmentHandler>,
    submit_handler: Arc<SubmitAssessmentHandler>,
    delete_handler: Arc<DeleteAssessmentHandler>,
    score_handler: Arc<ScoreAnswersHandler>,
}

impl AssessmentHandlers {
    /// Wires every handler to the same gateway and catalog.
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        let catalog = Arc::clone(gateway.catalog());
        Self {
            start_handler: Arc::new(StartAssessmentHandler::new(gateway.clone())),
            get_handler: Arc::new(GetAssessmentHandler::new(gateway.clone())),
            progress_handler: Arc::new(GetProgressHandler::new(gateway.clone())),
            answer_handler: Arc::new(RecordAnswerHandler::new(gateway.clone())),
            navigate_handler: Arc::new(NavigateAssessmentHandler::new(gateway.clone())),
            submit_handler: Arc::new(SubmitAssessmentHandler::new(gateway.clone())),
            delete_handler: Arc::new(DeleteAssessmentHandler::new(gateway)),
            score_handler: Arc::new(ScoreAnswersHandler::new(catalog.clone())),
            catalog,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/assessment/laps - Lap catalog
pub async fn get_catalog(State(handlers): State<AssessmentHandlers>) -> Response {
    let response = CatalogResponse::from(handlers.catalog.as_ref());
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/assessment/sessions - Start a new assessment
pub async fn start_assessment(
    State(handlers): State<AssessmentHandlers>,
    Json(req): Json<StartAssessmentRequest>,
) -> Response {
    let cmd = StartAssessmentCommand { track: req.track };

    match handlers.start_handler.handle(cmd).await {
        Ok(session) => {
            (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessment/sessions/:id - Get session details
pub async fn get_assessment(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetAssessmentQuery { session_id })
        .await
    {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessment/sessions/:id/progress - Overall or per-lap progress
pub async fn get_progress(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
    Query(params): Query<ProgressQueryParams>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let lap_id = match params.lap_id.map(LapId::new).transpose() {
        Ok(lap_id) => lap_id,
        Err(e) => return handle_assessment_error(AssessmentError::from(e).into()),
    };

    let query = GetProgressQuery {
        session_id,
        lap_id: lap_id.clone(),
    };

    match handlers.progress_handler.handle(query).await {
        Ok(progress) => {
            let response = ProgressResponse::new(lap_id.as_ref(), progress);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/assessment/sessions/:id/answers - Answer the active question
pub async fn record_answer(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let answer = match req {
        AnswerRequest::ByOption { option_id } => AnswerInput::Option { option_id },
        AnswerRequest::ByScore {
            question_id,
            score,
            advance,
        } => AnswerInput::Score {
            question_id,
            score,
            advance,
        },
    };

    match handlers
        .answer_handler
        .handle(RecordAnswerCommand { session_id, answer })
        .await
    {
        Ok(result) => {
            let response = AnswerResponse {
                recorded: RecordedAnswerResponse::from(&result.recorded),
                session: SessionResponse::from(&result.session),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/assessment/sessions/:id/advance - Move forward
pub async fn advance(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigationAction::Advance).await
}

/// POST /api/assessment/sessions/:id/retreat - Move back
pub async fn retreat(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    navigate(handlers, &session_id, NavigationAction::Retreat).await
}

/// POST /api/assessment/sessions/:id/laps/:lap_id/jump - Jump to a lap
pub async fn jump_to_lap(
    State(handlers): State<AssessmentHandlers>,
    Path((session_id, lap_id)): Path<(String, String)>,
) -> Response {
    let lap_id = match LapId::new(lap_id) {
        Ok(lap_id) => lap_id,
        Err(e) => return handle_assessment_error(AssessmentError::from(e).into()),
    };
    navigate(handlers, &session_id, NavigationAction::JumpToLap(lap_id)).await
}

async fn navigate(
    handlers: AssessmentHandlers,
    session_id: &str,
    action: NavigationAction,
) -> Response {
    let session_id = match parse_session_id(session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .navigate_handler
        .handle(NavigateAssessmentCommand { session_id, action })
        .await
    {
        Ok(result) => {
            (StatusCode::OK, Json(SessionResponse::from(&result.session))).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/assessment/sessions/:id/submit - Score and lock the session
pub async fn submit_assessment(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .submit_handler
        .handle(SubmitAssessmentCommand { session_id })
        .await
    {
        Ok(result) => {
            (StatusCode::OK, Json(SessionResponse::from(&result.session))).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// DELETE /api/assessment/sessions/:id - Discard a session
pub async fn delete_assessment(
    State(handlers): State<AssessmentHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete_handler
        .handle(DeleteAssessmentCommand { session_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/assessment/score - Score an answer sheet without a session
pub async fn score_answers(
    State(handlers): State<AssessmentHandlers>,
    Json(req): Json<ScoreRequest>,
) -> Response {
    let query = ScoreAnswersQuery {
        answers: req.answers,
    };

    match handlers.score_handler.handle(query) {
        Ok(result) => (StatusCode::OK, Json(ResultResponse::from(&result))).into_response(),
        Err(e) => handle_assessment_error(e.into()),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::PreconditionNotMet | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_assessment_error(error: AssessmentCommandError) -> Response {
    let status = status_for(error.code());
    if let AssessmentCommandError::Storage(err) = &error {
        tracing::error!(error = %err, "Snapshot store failure");
        return (
            status,
            Json(ErrorResponse::internal("Failed to access session storage")),
        )
            .into_response();
    }

    let body = ErrorResponse::from(DomainError::from(error));
    (status, Json(body)).into_response()
}
