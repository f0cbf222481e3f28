//! NavigateAssessmentHandler - Command handler for moving through the laps.

use std::sync::Arc;

use super::{AssessmentCommandError, SessionGateway};
use crate::domain::assessment::NavigationState;
use crate::domain::foundation::{LapId, SessionId};
use crate::domain::session::AssessmentSession;

/// A navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    Advance,
    Retreat,
    JumpToLap(LapId),
}

/// Command to navigate within a session.
#[derive(Debug, Clone)]
pub struct NavigateAssessmentCommand {
    pub session_id: SessionId,
    pub action: NavigationAction,
}

/// Result of a navigation step.
#[derive(Debug, Clone)]
pub struct NavigateAssessmentResult {
    pub session: AssessmentSession,
    pub state: NavigationState,
}

/// Handler for navigation commands.
pub struct NavigateAssessmentHandler {
    gateway: Arc<SessionGateway>,
}

impl NavigateAssessmentHandler {
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: NavigateAssessmentCommand,
    ) -> Result<NavigateAssessmentResult, AssessmentCommandError> {
        let (session, state) = self
            .gateway
            .update(cmd.session_id, |session| match &cmd.action {
                NavigationAction::Advance => session.advance(),
                NavigationAction::Retreat => session.retreat(),
                NavigationAction::JumpToLap(lap_id) => {
                    session.jump_to_lap(lap_id)?;
                    Ok(session.navigator().state())
                }
            })
            .await?;

        Ok(NavigateAssessmentResult { session, state })
    }
}
