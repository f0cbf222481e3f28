//! Assessment HTTP adapter.
//!
//! Exposes the lap catalog, session lifecycle and stateless scoring.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{health, AssessmentHandlers};
pub use routes::assessment_routes;
