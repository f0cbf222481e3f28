//! Assessment Navigator - the per-session navigation state machine.
//!
//! Owns the cursor and the answer sheet for one assessment. It is a plain
//! synchronous value: callers that share it across tasks serialise access
//! themselves.
//!
//! Navigation rules:
//! - `advance` moves to the next question, then the next lap's first question
//!   (optionally through a lap transition pause), then to finished.
//! - `retreat` mirrors `advance` and is a no-op at the very first question.
//! - `jump_to_lap` lands on the first unanswered question of a lap.
//! - Unknown laps, questions, options and scores are rejected, never clamped.

use std::sync::Arc;

use super::{
    AnswerSheet, AssessmentConfig, AssessmentError, AssessmentResult, Lap, NavigationPhase,
    NavigationState, Position, Progress, Question, ScoringEngine,
};
use crate::domain::foundation::{LapId, OptionId, QuestionId, StateMachine};

/// Index-based cursor. Every index is checked against the catalog on entry,
/// so lookups through it cannot miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    InProgress { lap: usize, question: usize },
    LapTransition { from: usize, to: usize },
    Finished,
}

impl Cursor {
    fn phase(&self) -> NavigationPhase {
        match self {
            Cursor::InProgress { .. } => NavigationPhase::InProgress,
            Cursor::LapTransition { .. } => NavigationPhase::LapTransition,
            Cursor::Finished => NavigationPhase::Finished,
        }
    }
}

/// An answer that was just written to the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAnswer {
    pub question_id: QuestionId,
    pub score: u32,
    /// Score that was overwritten, if the question had been answered before.
    pub previous: Option<u32>,
}

/// Navigation state machine over a shared, immutable catalog.
#[derive(Debug, Clone)]
pub struct AssessmentNavigator {
    config: Arc<AssessmentConfig>,
    cursor: Cursor,
    answers: AnswerSheet,
    pause_between_laps: bool,
}

impl AssessmentNavigator {
    /// Starts at the first question of the first lap with no answers.
    pub fn new(config: Arc<AssessmentConfig>) -> Self {
        Self {
            config,
            cursor: Cursor::InProgress {
                lap: 0,
                question: 0,
            },
            answers: AnswerSheet::new(),
            pause_between_laps: false,
        }
    }

    /// Enables or disables the pause between laps.
    pub fn with_lap_transitions(mut self, enabled: bool) -> Self {
        self.pause_between_laps = enabled;
        self
    }

    /// Rebuilds a navigator from persisted state, validating it against the
    /// catalog.
    pub fn restore(
        config: Arc<AssessmentConfig>,
        state: &NavigationState,
        answers: AnswerSheet,
        pause_between_laps: bool,
    ) -> Result<Self, AssessmentError> {
        let cursor = Self::cursor_for(&config, state)?;

        for (question_id, score) in answers.iter() {
            let (_, question) = config.find_question(question_id).ok_or_else(|| {
                AssessmentError::invalid_argument(
                    "question_id",
                    format!("unknown question '{}'", question_id),
                )
            })?;
            if !question.offers_score(score) {
                return Err(AssessmentError::invalid_argument(
                    "score",
                    format!("{} is not offered by question '{}'", score, question_id),
                ));
            }
        }

        Ok(Self {
            config,
            cursor,
            answers,
            pause_between_laps,
        })
    }

    fn cursor_for(
        config: &AssessmentConfig,
        state: &NavigationState,
    ) -> Result<Cursor, AssessmentError> {
        let lap_index = |lap_id: &LapId| {
            config.lap_index(lap_id).ok_or_else(|| {
                AssessmentError::invalid_argument("lap_id", format!("unknown lap '{}'", lap_id))
            })
        };

        match state {
            NavigationState::InProgress {
                lap_id,
                question_index,
            } => {
                let lap = lap_index(lap_id)?;
                let count = config.laps()[lap].question_count();
                if *question_index >= count {
                    return Err(AssessmentError::invalid_argument(
                        "question_index",
                        format!(
                            "index {} is out of range for lap '{}' ({} questions)",
                            question_index, lap_id, count
                        ),
                    ));
                }
                Ok(Cursor::InProgress {
                    lap,
                    question: *question_index,
                })
            }
            NavigationState::LapTransition { from, to } => {
                let from_index = lap_index(from)?;
                let to_index = lap_index(to)?;
                if to_index != from_index + 1 {
                    return Err(AssessmentError::invalid_argument(
                        "navigation_state",
                        format!("lap '{}' does not follow lap '{}'", to, from),
                    ));
                }
                Ok(Cursor::LapTransition {
                    from: from_index,
                    to: to_index,
                })
            }
            NavigationState::Finished => Ok(Cursor::Finished),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn lap_transitions_enabled(&self) -> bool {
        self.pause_between_laps
    }

    /// Current navigation state with catalog ids.
    pub fn state(&self) -> NavigationState {
        match self.cursor {
            Cursor::InProgress { lap, question } => NavigationState::InProgress {
                lap_id: self.config.laps()[lap].id.clone(),
                question_index: question,
            },
            Cursor::LapTransition { from, to } => NavigationState::LapTransition {
                from: self.config.laps()[from].id.clone(),
                to: self.config.laps()[to].id.clone(),
            },
            Cursor::Finished => NavigationState::Finished,
        }
    }

    /// Active lap and question index, or `None` outside a question.
    pub fn current_position(&self) -> Option<Position> {
        self.state().position()
    }

    /// The lap whose question is on screen.
    pub fn current_lap(&self) -> Option<&Lap> {
        match self.cursor {
            Cursor::InProgress { lap, .. } => self.config.lap_at(lap),
            _ => None,
        }
    }

    /// The question on screen.
    pub fn current_question(&self) -> Option<&Question> {
        match self.cursor {
            Cursor::InProgress { lap, question } => {
                self.config.lap_at(lap).and_then(|l| l.question(question))
            }
            _ => None,
        }
    }

    /// The lap about to start while paused between laps.
    pub fn upcoming_lap(&self) -> Option<&Lap> {
        match self.cursor {
            Cursor::LapTransition { to, .. } => self.config.lap_at(to),
            _ => None,
        }
    }

    /// Answered/total for one lap, or for the whole assessment when `lap_id`
    /// is `None`.
    pub fn progress(&self, lap_id: Option<&LapId>) -> Result<Progress, AssessmentError> {
        match lap_id {
            Some(id) => {
                let lap = self.config.lap(id).ok_or_else(|| {
                    AssessmentError::invalid_argument("lap_id", format!("unknown lap '{}'", id))
                })?;
                Ok(self.count(lap.questions.iter()))
            }
            None => Ok(self.count(self.config.questions())),
        }
    }

    fn count<'a>(&self, questions: impl Iterator<Item = &'a Question>) -> Progress {
        let (answered, total) = questions.fold((0, 0), |(answered, total), q| {
            let answered = answered + usize::from(self.answers.is_answered(&q.id));
            (answered, total + 1)
        });
        Progress::new(answered, total)
    }

    /// True when every question in every lap has an answer.
    pub fn is_complete(&self) -> bool {
        self.config
            .questions()
            .all(|q| self.answers.is_answered(&q.id))
    }

    /// Scores the current answers. Partial sheets score unanswered as zero.
    pub fn result(&self) -> AssessmentResult {
        ScoringEngine::compute(&self.answers, &self.config)
    }

    // ───────────────────────────────────────────────────────────────
    // Answers
    // ───────────────────────────────────────────────────────────────

    /// Records a score for the active question, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if no question is active, `question_id` is not the
    ///   active question, or `score` is not offered by it
    pub fn record_answer(
        &mut self,
        question_id: &QuestionId,
        score: u32,
    ) -> Result<RecordedAnswer, AssessmentError> {
        let question = self.active_question()?;
        if &question.id != question_id {
            return Err(AssessmentError::invalid_argument(
                "question_id",
                format!(
                    "'{}' is not the active question ('{}' is)",
                    question_id, question.id
                ),
            ));
        }
        if !question.offers_score(score) {
            return Err(AssessmentError::invalid_argument(
                "score",
                format!("{} is not offered by question '{}'", score, question_id),
            ));
        }

        let previous = self.answers.record(question_id.clone(), score);
        Ok(RecordedAnswer {
            question_id: question_id.clone(),
            score,
            previous,
        })
    }

    /// Records the score of one of the active question's options.
    pub fn select_option(
        &mut self,
        option_id: &OptionId,
    ) -> Result<RecordedAnswer, AssessmentError> {
        let question = self.active_question()?;
        let option = question.option(option_id).ok_or_else(|| {
            AssessmentError::invalid_argument(
                "option_id",
                format!(
                    "'{}' is not an option of question '{}'",
                    option_id, question.id
                ),
            )
        })?;
        let question_id = question.id.clone();
        let score = option.score;

        let previous = self.answers.record(question_id.clone(), score);
        Ok(RecordedAnswer {
            question_id,
            score,
            previous,
        })
    }

    fn active_question(&self) -> Result<&Question, AssessmentError> {
        self.current_question().ok_or_else(|| {
            AssessmentError::invalid_argument("question_id", "no question is active")
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Moves one step forward. A no-op once finished.
    pub fn advance(&mut self) -> NavigationState {
        let next = match self.cursor {
            Cursor::InProgress { lap, question } => {
                if question + 1 < self.question_count(lap) {
                    Cursor::InProgress {
                        lap,
                        question: question + 1,
                    }
                } else if lap + 1 < self.config.lap_count() {
                    if self.pause_between_laps {
                        Cursor::LapTransition {
                            from: lap,
                            to: lap + 1,
                        }
                    } else {
                        Cursor::InProgress {
                            lap: lap + 1,
                            question: 0,
                        }
                    }
                } else {
                    Cursor::Finished
                }
            }
            Cursor::LapTransition { to, .. } => Cursor::InProgress {
                lap: to,
                question: 0,
            },
            Cursor::Finished => Cursor::Finished,
        };
        self.move_to(next);
        self.state()
    }

    /// Moves one step back. A no-op at the first question of the first lap.
    pub fn retreat(&mut self) -> NavigationState {
        let previous = match self.cursor {
            Cursor::InProgress { lap, question } if question > 0 => Cursor::InProgress {
                lap,
                question: question - 1,
            },
            Cursor::InProgress { lap, .. } if lap > 0 => self.last_question_of(lap - 1),
            Cursor::InProgress { .. } => self.cursor,
            Cursor::LapTransition { from, .. } => self.last_question_of(from),
            Cursor::Finished => self.last_question_of(self.config.lap_count() - 1),
        };
        self.move_to(previous);
        self.state()
    }

    /// Jumps to the first unanswered question of a lap, or its first question
    /// when the lap is fully answered.
    pub fn jump_to_lap(&mut self, lap_id: &LapId) -> Result<Position, AssessmentError> {
        let lap_index = self.config.lap_index(lap_id).ok_or_else(|| {
            AssessmentError::invalid_argument("lap_id", format!("unknown lap '{}'", lap_id))
        })?;
        let question = self.config.laps()[lap_index]
            .questions
            .iter()
            .position(|q| !self.answers.is_answered(&q.id))
            .unwrap_or(0);

        self.move_to(Cursor::InProgress {
            lap: lap_index,
            question,
        });
        Ok(Position {
            lap_id: lap_id.clone(),
            question_index: question,
        })
    }

    /// Moves the cursor to finished regardless of position.
    pub fn finish(&mut self) {
        self.move_to(Cursor::Finished);
    }

    fn question_count(&self, lap: usize) -> usize {
        self.config.laps()[lap].question_count()
    }

    fn last_question_of(&self, lap: usize) -> Cursor {
        Cursor::InProgress {
            lap,
            question: self.question_count(lap) - 1,
        }
    }

    fn move_to(&mut self, next: Cursor) {
        if next == self.cursor {
            return;
        }
        debug_assert!(
            self.cursor.phase().can_transition_to(&next.phase()),
            "invalid navigation from {:?} to {:?}",
            self.cursor,
            next
        );
        self.cursor = next;
    }
}
