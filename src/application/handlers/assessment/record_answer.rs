//! RecordAnswerHandler - Command handler for answering the active question.
//!
//! Answers arrive either as a raw score for the active question or as the id
//! of one of its options. Choosing an option always moves on to the next
//! question; a raw score does so only when asked to.

use std::sync::Arc;

use super::{AssessmentCommandError, SessionGateway};
use crate::domain::assessment::RecordedAnswer;
use crate::domain::foundation::{OptionId, QuestionId, SessionId};
use crate::domain::session::AssessmentSession;

/// How the answer was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    Score {
        question_id: QuestionId,
        score: u32,
        advance: bool,
    },
    Option {
        option_id: OptionId,
    },
}

/// Command to record an answer.
#[derive(Debug, Clone)]
pub struct RecordAnswerCommand {
    pub session_id: SessionId,
    pub answer: AnswerInput,
}

/// Result of recording an answer.
#[derive(Debug, Clone)]
pub struct RecordAnswerResult {
    pub session: AssessmentSession,
    pub recorded: RecordedAnswer,
}

/// Handler for recording answers.
pub struct RecordAnswerHandler {
    gateway: Arc<SessionGateway>,
}

impl RecordAnswerHandler {
    pub fn new(gateway: Arc<SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: RecordAnswerCommand,
    ) -> Result<RecordAnswerResult, AssessmentCommandError> {
        let (session, recorded) = self
            .gateway
            .update(cmd.session_id, |session| match &cmd.answer {
                AnswerInput::Score {
                    question_id,
                    score,
                    advance,
                } => {
                    let recorded = session.record_answer(question_id, *score)?;
                    if *advance {
                        session.advance()?;
                    }
                    Ok(recorded)
                }
                AnswerInput::Option { option_id } => session.select_option(option_id),
            })
            .await?;

        Ok(RecordAnswerResult { session, recorded })
    }
}
