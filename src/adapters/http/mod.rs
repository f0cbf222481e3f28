//! HTTP adapters - REST API implementations.

pub mod assessment;

use axum::{routing::get, Router};

pub use assessment::{assessment_routes, AssessmentHandlers};

/// Builds the full API router: assessment endpoints plus the health check.
pub fn api_router(handlers: AssessmentHandlers) -> Router {
    Router::new()
        .route("/health", get(assessment::health))
        .nest("/api/assessment", assessment_routes(handlers))
}
