//! Lap catalog - the fixed configuration an assessment runs against.
//!
//! An [`AssessmentConfig`] is an ordered list of laps (scored dimensions), each
//! holding an ordered list of questions, each offering scored options. The
//! catalog is supplied once and shared immutably by every session.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::foundation::{LapId, OptionId, QuestionId};

/// Built-in five-lap catalog used when no catalog file is configured.
const STANDARD_CATALOG_YAML: &str = include_str!("../../../catalog/innovation_index.yaml");

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog must contain at least one lap")]
    NoLaps,

    #[error("Lap '{0}' has no questions")]
    EmptyLap(LapId),

    #[error("Question '{0}' has no options")]
    NoOptions(QuestionId),

    #[error("Duplicate lap id '{0}'")]
    DuplicateLap(LapId),

    #[error("Duplicate question id '{0}'")]
    DuplicateQuestion(QuestionId),

    #[error("Duplicate option id '{option}' in question '{question}'")]
    DuplicateOption {
        question: QuestionId,
        option: OptionId,
    },

    #[error("Lap '{0}' has a best achievable score that overflows")]
    ScoreOverflow(LapId),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A selectable answer and the points it awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub text: String,
    pub score: u32,
}

impl AnswerOption {
    pub fn new(id: OptionId, text: impl Into<String>, score: u32) -> Self {
        Self {
            id,
            text: text.into(),
            score,
        }
    }
}

/// A single prompt with its ordered options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            id,
            text: text.into(),
            options,
        }
    }

    /// Looks up an option by id.
    pub fn option(&self, option_id: &OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| &o.id == option_id)
    }

    /// Returns true if some option of this question awards exactly `score`.
    pub fn offers_score(&self, score: u32) -> bool {
        self.options.iter().any(|o| o.score == score)
    }

    /// Highest score any option awards.
    pub fn max_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }
}

/// A lap, i.e. one scored dimension of the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    pub id: LapId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
}

impl Lap {
    pub fn new(
        id: LapId,
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            questions,
        }
    }

    /// Number of questions in this lap.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Returns the question at `index`, if in range.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Returns the position of a question within this lap.
    pub fn question_index(&self, question_id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| &q.id == question_id)
    }

    /// Best achievable dimension score for this lap.
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::max_score).sum()
    }
}

/// Serialized shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    laps: Vec<Lap>,
}

/// The ordered, immutable lap catalog.
///
/// Construction validates the structure once so the navigator can rely on
/// every lap having at least one question and every id being unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentConfig {
    laps: Vec<Lap>,
}

impl AssessmentConfig {
    /// Builds a catalog from laps in presentation order.
    pub fn new(laps: Vec<Lap>) -> Result<Self, CatalogError> {
        Self::validate(&laps)?;
        Ok(Self { laps })
    }

    /// Parses and validates a YAML catalog document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.laps)
    }

    /// The built-in five-lap Innovation Index catalog.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_yaml_str(STANDARD_CATALOG_YAML)
    }

    fn validate(laps: &[Lap]) -> Result<(), CatalogError> {
        if laps.is_empty() {
            return Err(CatalogError::NoLaps);
        }

        let mut lap_ids = HashSet::new();
        let mut total_max: u32 = 0;
        // Answers are keyed by question id alone, so uniqueness spans every lap.
        let mut question_ids = HashSet::new();

        for lap in laps {
            if !lap_ids.insert(&lap.id) {
                return Err(CatalogError::DuplicateLap(lap.id.clone()));
            }
            if lap.questions.is_empty() {
                return Err(CatalogError::EmptyLap(lap.id.clone()));
            }
            for question in &lap.questions {
                if !question_ids.insert(&question.id) {
                    return Err(CatalogError::DuplicateQuestion(question.id.clone()));
                }
                if question.options.is_empty() {
                    return Err(CatalogError::NoOptions(question.id.clone()));
                }
                let mut option_ids = HashSet::new();
                for option in &question.options {
                    if !option_ids.insert(&option.id) {
                        return Err(CatalogError::DuplicateOption {
                            question: question.id.clone(),
                            option: option.id.clone(),
                        });
                    }
                }
            }
            // Scoring sums best scores per lap and then across laps.
            total_max = lap
                .questions
                .iter()
                .try_fold(0u32, |acc, q| acc.checked_add(q.max_score()))
                .and_then(|lap_max| total_max.checked_add(lap_max))
                .ok_or_else(|| CatalogError::ScoreOverflow(lap.id.clone()))?;
        }

        Ok(())
    }

    /// Laps in presentation order.
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Number of laps.
    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    /// Returns the lap at `index`, if in range.
    pub fn lap_at(&self, index: usize) -> Option<&Lap> {
        self.laps.get(index)
    }

    /// Looks up a lap by id.
    pub fn lap(&self, lap_id: &LapId) -> Option<&Lap> {
        self.laps.iter().find(|l| &l.id == lap_id)
    }

    /// Returns the position of a lap in the catalog.
    pub fn lap_index(&self, lap_id: &LapId) -> Option<usize> {
        self.laps.iter().position(|l| &l.id == lap_id)
    }

    /// Total number of questions across all laps.
    pub fn question_count(&self) -> usize {
        self.laps.iter().map(Lap::question_count).sum()
    }

    /// Iterates every question in presentation order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.laps.iter().flat_map(|l| l.questions.iter())
    }

    /// Finds a question and the lap that owns it.
    pub fn find_question(&self, question_id: &QuestionId) -> Option<(&Lap, &Question)> {
        self.laps.iter().find_map(|lap| {
            lap.questions
                .iter()
                .find(|q| &q.id == question_id)
                .map(|q| (lap, q))
        })
    }

    /// Best achievable total score.
    pub fn max_score(&self) -> u32 {
        self.laps.iter().map(Lap::max_score).sum()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Builds a catalog from `(lap_id, [(question_id, [scores])])` tuples.
    ///
    /// Option ids are `<question_id>_<score>`.
    pub fn catalog(spec: &[(&str, &[(&str, &[u32])])]) -> AssessmentConfig {
        let laps = spec
            .iter()
            .map(|(lap_id, questions)| {
                let questions = questions
                    .iter()
                    .map(|(qid, scores)| {
                        let options = scores
                            .iter()
                            .map(|s| {
                                AnswerOption::new(
                                    OptionId::new(format!("{}_{}", qid, s)).unwrap(),
                                    format!("Option worth {}", s),
                                    *s,
                                )
                            })
                            .collect();
                        Question::new(QuestionId::new(*qid).unwrap(), "Prompt", options)
                    })
                    .collect();
                Lap::new(LapId::new(*lap_id).unwrap(), *lap_id, "", questions)
            })
            .collect();
        AssessmentConfig::new(laps).unwrap()
    }

    /// Two laps of two questions, each question offering 0, 5 and 10.
    pub fn two_by_two() -> AssessmentConfig {
        catalog(&[
            ("lap1", &[("q1", &[0, 5, 10]), ("q2", &[0, 5, 10])]),
            ("lap2", &[("q3", &[0, 5, 10]), ("q4", &[0, 5, 10])]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn lap_id(s: &str) -> LapId {
        LapId::new(s).unwrap()
    }

    fn question_id(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[test]
    fn standard_catalog_has_five_laps_of_four_questions() {
        let config = AssessmentConfig::standard().unwrap();
        assert_eq!(config.lap_count(), 5);
        assert!(config.laps().iter().all(|l| l.question_count() == 4));
        assert_eq!(config.question_count(), 20);
    }

    #[test]
    fn standard_catalog_tops_out_at_one_hundred() {
        let config = AssessmentConfig::standard().unwrap();
        assert_eq!(config.max_score(), 100);
        assert!(config.laps().iter().all(|l| l.max_score() == 20));
    }

    #[test]
    fn lookup_by_id_and_index_agree() {
        let config = two_by_two();
        assert_eq!(config.lap_index(&lap_id("lap2")), Some(1));
        assert_eq!(config.lap(&lap_id("lap2")), config.lap_at(1));
        assert!(config.lap(&lap_id("lap9")).is_none());
    }

    #[test]
    fn find_question_returns_owning_lap() {
        let config = two_by_two();
        let (lap, question) = config.find_question(&question_id("q3")).unwrap();
        assert_eq!(lap.id, lap_id("lap2"));
        assert_eq!(question.id, question_id("q3"));
    }

    #[test]
    fn questions_iterate_in_presentation_order() {
        let config = two_by_two();
        let ids: Vec<_> = config.questions().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3", "q4"]);
    }

    #[test]
    fn question_reports_offered_scores() {
        let config = two_by_two();
        let (_, q) = config.find_question(&question_id("q1")).unwrap();
        assert!(q.offers_score(5));
        assert!(!q.offers_score(7));
        assert_eq!(q.max_score(), 10);
        assert_eq!(q.option(&OptionId::new("q1_10").unwrap()).map(|o| o.score), Some(10));
    }

    // ───────────────────────────────────────────────────────────────
    // Validation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(AssessmentConfig::new(vec![]), Err(CatalogError::NoLaps)));
    }

    #[test]
    fn rejects_lap_without_questions() {
        let lap = Lap::new(lap_id("empty"), "Empty", "", vec![]);
        assert!(matches!(
            AssessmentConfig::new(vec![lap]),
            Err(CatalogError::EmptyLap(id)) if id.as_str() == "empty"
        ));
    }

    #[test]
    fn rejects_duplicate_lap_ids() {
        let yaml = r#"
laps:
  - id: a
    title: A
    questions:
      - id: q1
        text: One
        options: [{ id: o1, text: x, score: 1 }]
  - id: a
    title: A again
    questions:
      - id: q2
        text: Two
        options: [{ id: o1, text: x, score: 1 }]
"#;
        assert!(matches!(
            AssessmentConfig::from_yaml_str(yaml),
            Err(CatalogError::DuplicateLap(_))
        ));
    }

    #[test]
    fn rejects_question_ids_repeated_across_laps() {
        let yaml = r#"
laps:
  - id: a
    title: A
    questions:
      - id: q1
        text: One
        options: [{ id: o1, text: x, score: 1 }]
  - id: b
    title: B
    questions:
      - id: q1
        text: One again
        options: [{ id: o1, text: x, score: 1 }]
"#;
        assert!(matches!(
            AssessmentConfig::from_yaml_str(yaml),
            Err(CatalogError::DuplicateQuestion(id)) if id.as_str() == "q1"
        ));
    }

    #[test]
    fn rejects_duplicate_option_ids_within_question() {
        let yaml = r#"
laps:
  - id: a
    title: A
    questions:
      - id: q1
        text: One
        options:
          - { id: o1, text: x, score: 1 }
          - { id: o1, text: y, score: 2 }
"#;
        assert!(matches!(
            AssessmentConfig::from_yaml_str(yaml),
            Err(CatalogError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn rejects_lap_whose_best_score_overflows() {
        let half = u32::MAX / 2 + 1;
        let lap = Lap::new(
            lap_id("big"),
            "Big",
            "",
            vec![
                Question::new(
                    question_id("q1"),
                    "One",
                    vec![AnswerOption::new(OptionId::new("o1").unwrap(), "x", half)],
                ),
                Question::new(
                    question_id("q2"),
                    "Two",
                    vec![AnswerOption::new(OptionId::new("o2").unwrap(), "y", half)],
                ),
            ],
        );
        assert!(matches!(
            AssessmentConfig::new(vec![lap]),
            Err(CatalogError::ScoreOverflow(id)) if id.as_str() == "big"
        ));
    }

    #[test]
    fn rejects_catalog_whose_total_best_score_overflows() {
        let half = u32::MAX / 2 + 1;
        let yaml = format!(
            r#"
laps:
  - id: a
    title: A
    questions:
      - id: q1
        text: One
        options: [{{ id: o1, text: x, score: {half} }}]
  - id: b
    title: B
    questions:
      - id: q2
        text: Two
        options: [{{ id: o1, text: x, score: {half} }}]
"#
        );
        assert!(matches!(
            AssessmentConfig::from_yaml_str(&yaml),
            Err(CatalogError::ScoreOverflow(id)) if id.as_str() == "b"
        ));
    }

    #[test]
    fn accepts_catalog_whose_best_score_is_exactly_u32_max() {
        let yaml = format!(
            r#"
laps:
  - id: a
    title: A
    questions:
      - id: q1
        text: One
        options: [{{ id: o1, text: x, score: {max} }}]
"#,
            max = u32::MAX
        );
        let config = AssessmentConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(config.max_score(), u32::MAX);
    }

    #[test]
    fn rejects_question_without_options() {
        let yaml = r#"
laps:
  - id: a
    title: A
    questions:
      - id: q1
        text: One
        options: []
"#;
        assert!(matches!(
            AssessmentConfig::from_yaml_str(yaml),
            Err(CatalogError::NoOptions(_))
        ));
    }

    #[test]
    fn rejects_blank_ids_at_parse_time() {
        let yaml = r#"
laps:
  - id: ""
    title: A
    questions: []
"#;
        assert!(matches!(
            AssessmentConfig::from_yaml_str(yaml),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn description_defaults_to_empty() {
        let yaml = r#"
laps:
  - id: a
    title: A
    questions:
      - id: q1
        text: One
        options: [{ id: o1, text: x, score: 1 }]
"#;
        let config = AssessmentConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.laps()[0].description, "");
    }
}
