//! StartAssessmentHandler - Command handler for starting a new session.

use std::sync::Arc;

use super::{AssessmentCommandError, SessionGateway};
use crate::domain::foundation::ApplicantTrack;
use crate::domain::session::AssessmentSession;

/// Command to start a new assessment.
#[derive(Debug, Clone)]
pub struct StartAssessmentCommand {
    pub track: ApplicantTrack,
}

/// Handler for starting assessments.
pub struct StartAssessmentHandler {
    gateway: Arc<SessionGateway>,
}

impl StartAssessmentHandler {
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: StartAssessmentCommand,
    ) -> Result<AssessmentSession, AssessmentCommandError> {
        self.gateway.create(cmd.track).await
    }
}
