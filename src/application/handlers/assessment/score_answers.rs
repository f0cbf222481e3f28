//! ScoreAnswersHandler - Stateless scoring of a caller-supplied answer sheet.

use std::sync::Arc;

use crate::domain::assessment::{
    AnswerSheet, AssessmentConfig, AssessmentError, AssessmentResult, ScoringEngine,
};

/// Query to score an answer sheet against the catalog.
#[derive(Debug, Clone)]
pub struct ScoreAnswersQuery {
    pub answers: AnswerSheet,
}

/// Handler for stateless scoring.
pub struct ScoreAnswersHandler {
    catalog: Arc<AssessmentConfig>,
}

impl ScoreAnswersHandler {
    pub fn new(catalog: Arc<AssessmentConfig>) -> Self {
        Self { catalog }
    }

    /// Scores the sheet. Partial sheets are accepted; answers for questions
    /// the catalog does not contain, or with a score the question does not
    /// offer, are rejected.
    pub fn handle(&self, query: ScoreAnswersQuery) -> Result<AssessmentResult, AssessmentError> {
        for (question_id, score) in query.answers.iter() {
            let (_, question) = self.catalog.find_question(question_id).ok_or_else(|| {
                AssessmentError::invalid_argument(
                    "question_id",
                    format!("unknown question '{}'", question_id),
                )
            })?;
            if !question.offers_score(score) {
                return Err(AssessmentError::invalid_argument(
                    "score",
                    format!("question '{}' offers no option worth {}", question_id, score),
                ));
            }
        }

        Ok(ScoringEngine::compute(&query.answers, &self.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::test_support::two_by_two;
    use crate::domain::assessment::Bucket;
    use crate::domain::foundation::QuestionId;

    fn sheet(entries: &[(&str, u32)]) -> AnswerSheet {
        entries
            .iter()
            .map(|(q, s)| (QuestionId::new(*q).unwrap(), *s))
            .collect()
    }

    #[test]
    fn scores_partial_sheet() {
        let handler = ScoreAnswersHandler::new(Arc::new(two_by_two()));
        let result = handler
            .handle(ScoreAnswersQuery {
                answers: sheet(&[("q1", 10), ("q3", 10)]),
            })
            .unwrap();

        assert_eq!(result.total_score(), 20);
        assert!(result.low_dimensions().is_empty());
        assert_eq!(result.bucket(), Bucket::Red);
    }

    #[test]
    fn rejects_unknown_question() {
        let handler = ScoreAnswersHandler::new(Arc::new(two_by_two()));
        let err = handler
            .handle(ScoreAnswersQuery {
                answers: sheet(&[("q1", 10), ("q9", 10)]),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            AssessmentError::InvalidArgument { ref field, .. } if field == "question_id"
        ));
    }

    #[test]
    fn rejects_score_the_question_does_not_offer() {
        let handler = ScoreAnswersHandler::new(Arc::new(two_by_two()));
        let err = handler
            .handle(ScoreAnswersQuery {
                answers: sheet(&[("q1", 1000), ("q3", 10)]),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            AssessmentError::InvalidArgument { ref field, .. } if field == "score"
        ));
    }

    #[test]
    fn rejects_scores_that_would_overflow_the_total() {
        let handler = ScoreAnswersHandler::new(Arc::new(two_by_two()));
        let err = handler
            .handle(ScoreAnswersQuery {
                answers: sheet(&[("q1", u32::MAX), ("q2", 1)]),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            AssessmentError::InvalidArgument { ref field, .. } if field == "score"
        ));
    }

    #[test]
    fn scores_every_offered_maximum() {
        let handler = ScoreAnswersHandler::new(Arc::new(two_by_two()));
        let result = handler
            .handle(ScoreAnswersQuery {
                answers: sheet(&[("q1", 10), ("q2", 10), ("q3", 10), ("q4", 10)]),
            })
            .unwrap();

        assert_eq!(result.total_score(), 40);
    }
}
