//! Answer mapping - question id to the score of the selected option.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::QuestionId;

/// Recorded answers for one assessment.
///
/// Absence of a key means the question is unanswered. Recording again for the
/// same question overwrites the previous score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(HashMap<QuestionId, u32>);

impl AnswerSheet {
    /// Creates an empty answer sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a score, returning the score it replaced, if any.
    pub fn record(&mut self, question_id: QuestionId, score: u32) -> Option<u32> {
        self.0.insert(question_id, score)
    }

    /// Returns the recorded score for a question.
    pub fn score(&self, question_id: &QuestionId) -> Option<u32> {
        self.0.get(question_id).copied()
    }

    /// Returns true if the question has an answer.
    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates recorded answers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, u32)> {
        self.0.iter().map(|(id, score)| (id, *score))
    }
}

impl FromIterator<(QuestionId, u32)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<HashMap<QuestionId, u32>> for AnswerSheet {
    fn from(map: HashMap<QuestionId, u32>) -> Self {
        Self(map)
    }
}
