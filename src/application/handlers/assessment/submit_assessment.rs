//! SubmitAssessmentHandler - Command handler for scoring and closing a session.

use std::sync::Arc;

use super::{AssessmentCommandError, SessionGateway};
use crate::domain::assessment::AssessmentResult;
use crate::domain::foundation::SessionId;
use crate::domain::session::AssessmentSession;

/// Command to submit an assessment.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentCommand {
    pub session_id: SessionId,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentResult {
    pub session: AssessmentSession,
    pub result: AssessmentResult,
}

/// Handler for submitting assessments.
pub struct SubmitAssessmentHandler {
    gateway: Arc<SessionGateway>,
}

impl SubmitAssessmentHandler {
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAssessmentCommand,
    ) -> Result<SubmitAssessmentResult, AssessmentCommandError> {
        let (session, result) = self
            .gateway
            .update(cmd.session_id, |session| session.submit().cloned())
            .await?;

        Ok(SubmitAssessmentResult { session, result })
    }
}
