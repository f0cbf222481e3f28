//! End-to-end tests of the assessment HTTP API over in-memory storage.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use innovation_index::adapters::http::{api_router, AssessmentHandlers};
use innovation_index::adapters::storage::InMemorySnapshotStore;
use innovation_index::application::SessionGateway;
use innovation_index::domain::assessment::AssessmentConfig;

const TWO_LAPS: &str = r#"
laps:
  - id: lap1
    title: First lap
    description: Warm-up questions
    questions:
      - id: q1
        text: First question
        options:
          - { id: q1_low, text: Low, score: 0 }
          - { id: q1_high, text: High, score: 10 }
      - id: q2
        text: Second question
        options:
          - { id: q2_low, text: Low, score: 0 }
          - { id: q2_high, text: High, score: 10 }
  - id: lap2
    title: Second lap
    questions:
      - id: q3
        text: Third question
        options:
          - { id: q3_low, text: Low, score: 5 }
          - { id: q3_high, text: High, score: 10 }
      - id: q4
        text: Fourth question
        options:
          - { id: q4_low, text: Low, score: 5 }
          - { id: q4_high, text: High, score: 10 }
"#;

fn app_with(pause_between_laps: bool) -> Router {
    let catalog = Arc::new(AssessmentConfig::from_yaml_str(TWO_LAPS).unwrap());
    let gateway = SessionGateway::new(Arc::new(InMemorySnapshotStore::new()), catalog)
        .with_lap_transitions(pause_between_laps);
    api_router(AssessmentHandlers::new(Arc::new(gateway)))
}

fn app() -> Router {
    app_with(false)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn start(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/assessment/sessions",
        Some(json!({ "track": "founder" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn answer(app: &Router, id: &str, question_id: &str, score: u32) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/api/assessment/sessions/{}/answers", id),
        Some(json!({ "question_id": question_id, "score": score })),
    )
    .await
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn catalog_lists_laps_in_order() {
    let (status, body) = send(&app(), "GET", "/api/assessment/laps", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lap_count"], 2);
    assert_eq!(body["question_count"], 4);
    assert_eq!(body["max_score"], 40);
    assert_eq!(body["laps"][0]["id"], "lap1");
    assert_eq!(body["laps"][1]["questions"][1]["id"], "q4");
}

#[tokio::test]
async fn new_session_starts_at_first_question() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/assessment/sessions",
        Some(json!({ "track": "innovator" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["track"], "innovator");
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["navigation"]["state"], "in_progress");
    assert_eq!(body["navigation"]["lap_id"], "lap1");
    assert_eq!(body["position"]["question_number"], 1);
    assert_eq!(body["current_question"]["id"], "q1");
    assert_eq!(body["progress"]["answered"], 0);
    assert_eq!(body["progress"]["total"], 4);
}

#[tokio::test]
async fn full_walkthrough_scores_red_on_low_total() {
    let app = app();
    let id = start(&app).await;

    for (question, score) in [("q1", 10), ("q2", 0), ("q3", 5), ("q4", 5)] {
        let (status, _) = answer(&app, &id, question, score).await;
        assert_eq!(status, StatusCode::OK, "answering {}", question);
    }

    let (status, body) = send(&app, "GET", &format!("/api/assessment/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["navigation"]["state"], "finished");
    assert_eq!(body["progress"]["is_complete"], true);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/submit", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "submitted");
    assert_eq!(body["result"]["total_score"], 20);
    assert_eq!(body["result"]["bucket"], "RED");
    assert_eq!(body["result"]["dimension_scores"][0]["score"], 10);
    assert_eq!(body["result"]["dimension_scores"][1]["score"], 10);
    assert_eq!(body["result"]["low_dimensions"], json!([]));
}

#[tokio::test]
async fn answer_by_option_records_and_advances() {
    let app = app();
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/answers", id),
        Some(json!({ "option_id": "q1_high" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recorded"]["question_id"], "q1");
    assert_eq!(body["recorded"]["score"], 10);
    assert_eq!(body["session"]["current_question"]["id"], "q2");
    assert_eq!(body["session"]["answers"]["q1"], 10);
}

#[tokio::test]
async fn answer_without_advance_stays_on_question() {
    let app = app();
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/answers", id),
        Some(json!({ "question_id": "q1", "score": 0, "advance": false })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["current_question"]["id"], "q1");
}

#[tokio::test]
async fn answering_inactive_question_is_rejected() {
    let app = app();
    let id = start(&app).await;

    let (status, body) = answer(&app, &id, "q3", 5).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert!(body["details"]["field"].is_string());
}

#[tokio::test]
async fn score_not_offered_is_rejected() {
    let app = app();
    let id = start(&app).await;

    let (status, _) = answer(&app, &id, "q1", 7).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn retreat_at_start_is_noop() {
    let app = app();
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/retreat", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["navigation"]["lap_id"], "lap1");
    assert_eq!(body["navigation"]["question_index"], 0);
}

#[tokio::test]
async fn jump_lands_on_first_unanswered_question() {
    let app = app();
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/laps/lap2/jump", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_question"]["id"], "q3");

    let (status, _) = answer(&app, &id, "q3", 10).await;
    assert_eq!(status, StatusCode::OK);

    send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/laps/lap1/jump", id),
        None,
    )
    .await;
    let (_, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/laps/lap2/jump", id),
        None,
    )
    .await;
    assert_eq!(body["current_question"]["id"], "q4");
}

#[tokio::test]
async fn jump_to_unknown_lap_is_rejected() {
    let app = app();
    let id = start(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/laps/nope/jump", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn lap_transition_pause_shows_upcoming_lap() {
    let app = app_with(true);
    let id = start(&app).await;

    answer(&app, &id, "q1", 10).await;
    let (_, body) = answer(&app, &id, "q2", 10).await;

    let session = &body["session"];
    assert_eq!(session["navigation"]["state"], "lap_transition");
    assert_eq!(session["navigation"]["from"], "lap1");
    assert_eq!(session["navigation"]["to"], "lap2");
    assert_eq!(session["upcoming_lap"]["title"], "Second lap");
    assert!(session.get("position").is_none());

    let (_, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/advance", id),
        None,
    )
    .await;
    assert_eq!(body["current_question"]["id"], "q3");
}

#[tokio::test]
async fn progress_per_lap_and_overall() {
    let app = app();
    let id = start(&app).await;
    answer(&app, &id, "q1", 10).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/assessment/sessions/{}/progress?lap_id=lap1", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lap_id"], "lap1");
    assert_eq!(body["answered"], 1);
    assert_eq!(body["total"], 2);
    assert_eq!(body["percent"], 50);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/assessment/sessions/{}/progress", id),
        None,
    )
    .await;
    assert_eq!(body["answered"], 1);
    assert_eq!(body["total"], 4);
    assert_eq!(body["remaining"], 3);
}

#[tokio::test]
async fn incomplete_submission_is_conflict() {
    let app = app();
    let id = start(&app).await;
    answer(&app, &id, "q1", 10).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/submit", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PRECONDITION_NOT_MET");
}

#[tokio::test]
async fn submitted_session_rejects_answers() {
    let app = app();
    let id = start(&app).await;
    for (question, score) in [("q1", 10), ("q2", 10), ("q3", 10), ("q4", 10)] {
        answer(&app, &id, question, score).await;
    }
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/submit", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    send(
        &app,
        "POST",
        &format!("/api/assessment/sessions/{}/laps/lap1/jump", id),
        None,
    )
    .await;
    let (status, _) = answer(&app, &id, "q1", 0).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (status, body) = send(
        &app(),
        "GET",
        "/api/assessment/sessions/550e8400-e29b-41d4-a716-446655440000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
    assert_eq!(
        body["details"]["session_id"],
        "550e8400-e29b-41d4-a716-446655440000"
    );
}

#[tokio::test]
async fn malformed_session_id_is_bad_request() {
    let (status, _) = send(&app(), "GET", "/api/assessment/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stateless_score_accepts_partial_sheet() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/assessment/score",
        Some(json!({ "answers": { "q1": 10, "q3": 5 } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_score"], 15);
    assert_eq!(body["bucket"], "RED");
    assert_eq!(body["low_dimensions"], json!(["lap2"]));
}

#[tokio::test]
async fn stateless_score_rejects_unknown_question() {
    let (status, _) = send(
        &app(),
        "POST",
        "/api/assessment/score",
        Some(json!({ "answers": { "zz": 10 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stateless_score_rejects_score_not_offered() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/assessment/score",
        Some(json!({ "answers": { "q1": 1000, "q2": 1000, "q3": 10, "q4": 10 } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert_eq!(body["details"]["field"], "score");
}

#[tokio::test]
async fn stateless_score_rejects_scores_that_would_overflow() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/assessment/score",
        Some(json!({ "answers": { "q1": 4294967295u64, "q2": 1 } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "score");
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let app = app();
    let id = start(&app).await;
    let uri = format!("/api/assessment/sessions/{}", id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}
