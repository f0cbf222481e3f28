//! DeleteAssessmentHandler - Command handler for discarding a session.

use std::sync::Arc;

use super::{AssessmentCommandError, SessionGateway};
use crate::domain::foundation::SessionId;

/// Command to delete an assessment, submitted or not.
#[derive(Debug, Clone)]
pub struct DeleteAssessmentCommand {
    pub session_id: SessionId,
}

/// Handler for deleting assessments.
pub struct DeleteAssessmentHandler {
    gateway: Arc<SessionGateway>,
}

impl DeleteAssessmentHandler {
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: DeleteAssessmentCommand) -> Result<(), AssessmentCommandError> {
        self.gateway.delete(cmd.session_id).await
    }
}
