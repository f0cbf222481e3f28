//! Scoring Engine - dimension scores, total score and bucket classification.
//!
//! Scoring is a pure function of the answer sheet and the catalog. Unanswered
//! questions count as zero, so partial sheets are scored the same way as
//! complete ones.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AnswerSheet, AssessmentConfig, Lap};
use crate::domain::foundation::LapId;

/// A dimension scoring below this is "low".
pub const LOW_DIMENSION_THRESHOLD: u32 = 10;

/// Totals below this are always RED.
pub const RED_TOTAL_THRESHOLD: u32 = 60;

/// Totals at or above this are GREEN when no dimension is low.
pub const GREEN_TOTAL_THRESHOLD: u32 = 75;

/// This many low dimensions force RED regardless of total.
pub const RED_LOW_DIMENSION_COUNT: usize = 2;

/// Traffic-light classification of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bucket {
    Green,
    Yellow,
    Red,
}

impl Bucket {
    /// Classifies a total score and low-dimension count. First match wins:
    /// RED, then GREEN, then YELLOW.
    pub fn classify(total_score: u32, low_dimension_count: usize) -> Self {
        if total_score < RED_TOTAL_THRESHOLD || low_dimension_count >= RED_LOW_DIMENSION_COUNT {
            Bucket::Red
        } else if total_score >= GREEN_TOTAL_THRESHOLD && low_dimension_count == 0 {
            Bucket::Green
        } else {
            Bucket::Yellow
        }
    }

    /// Returns the wire label for this bucket.
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Green => "GREEN",
            Bucket::Yellow => "YELLOW",
            Bucket::Red => "RED",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Score of one lap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub lap_id: LapId,
    pub title: String,
    pub score: u32,
    pub max_score: u32,
    pub is_low: bool,
}

/// Immutable scoring snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    dimension_scores: Vec<DimensionScore>,
    total_score: u32,
    bucket: Bucket,
    low_dimensions: Vec<LapId>,
}

impl AssessmentResult {
    /// Dimension scores in catalog order.
    pub fn dimension_scores(&self) -> &[DimensionScore] {
        &self.dimension_scores
    }

    /// Score of a single lap.
    pub fn dimension_score(&self, lap_id: &LapId) -> Option<u32> {
        self.dimension_scores
            .iter()
            .find(|d| &d.lap_id == lap_id)
            .map(|d| d.score)
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    /// Laps scoring below [`LOW_DIMENSION_THRESHOLD`], in catalog order.
    pub fn low_dimensions(&self) -> &[LapId] {
        &self.low_dimensions
    }

    /// The lowest scoring dimension. Ties go to the earlier lap.
    pub fn weakest_dimension(&self) -> Option<&DimensionScore> {
        self.dimension_scores
            .iter()
            .reduce(|weakest, d| if d.score < weakest.score { d } else { weakest })
    }
}

/// Computes [`AssessmentResult`]s.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores an answer sheet against a catalog.
    ///
    /// Every recorded score must be one its question offers. A validated
    /// catalog's best total fits in `u32`, so these sums cannot overflow.
    pub fn compute(answers: &AnswerSheet, config: &AssessmentConfig) -> AssessmentResult {
        let dimension_scores: Vec<DimensionScore> = config
            .laps()
            .iter()
            .map(|lap| {
                let score = Self::dimension_score(lap, answers);
                DimensionScore {
                    lap_id: lap.id.clone(),
                    title: lap.title.clone(),
                    score,
                    max_score: lap.max_score(),
                    is_low: Self::is_low(score),
                }
            })
            .collect();

        let total_score = dimension_scores.iter().map(|d| d.score).sum();
        let low_dimensions: Vec<LapId> = dimension_scores
            .iter()
            .filter(|d| d.is_low)
            .map(|d| d.lap_id.clone())
            .collect();
        let bucket = Bucket::classify(total_score, low_dimensions.len());

        AssessmentResult {
            dimension_scores,
            total_score,
            bucket,
            low_dimensions,
        }
    }

    /// Sum of the recorded answers for a lap's questions, zero if unanswered.
    pub fn dimension_score(lap: &Lap, answers: &AnswerSheet) -> u32 {
        lap.questions
            .iter()
            .map(|q| answers.score(&q.id).unwrap_or(0))
            .sum()
    }

    /// Returns true if a dimension score counts as low.
    pub fn is_low(score: u32) -> bool {
        score < LOW_DIMENSION_THRESHOLD
    }
}
