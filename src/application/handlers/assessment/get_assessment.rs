//! Query handlers for reading sessions and their progress.

use std::sync::Arc;

use super::{AssessmentCommandError, SessionGateway};
use crate::domain::assessment::Progress;
use crate::domain::foundation::{LapId, SessionId};
use crate::domain::session::AssessmentSession;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetAssessmentQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving sessions.
pub struct GetAssessmentHandler {
    gateway: Arc<SessionGateway>,
}

impl GetAssessmentHandler {
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        query: GetAssessmentQuery,
    ) -> Result<AssessmentSession, AssessmentCommandError> {
        self.gateway.load(query.session_id).await
    }
}

/// Query for answered/total counts, for one lap or the whole assessment.
#[derive(Debug, Clone)]
pub struct GetProgressQuery {
    pub session_id: SessionId,
    pub lap_id: Option<LapId>,
}

/// Handler for progress queries.
pub struct GetProgressHandler {
    gateway: Arc<SessionGateway>,
}

impl GetProgressHandler {
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        query: GetProgressQuery,
    ) -> Result<Progress, AssessmentCommandError> {
        let session = self.gateway.load(query.session_id).await?;
        Ok(session.progress(query.lap_id.as_ref())?)
    }
}
