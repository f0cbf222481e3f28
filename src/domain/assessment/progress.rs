//! Answered/total counts for a lap or the whole assessment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;

/// Completion counts returned by progress queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(answered: usize, total: usize) -> Self {
        Self { answered, total }
    }

    /// Questions still without an answer.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }

    /// True when every counted question has an answer.
    pub fn is_complete(&self) -> bool {
        self.answered >= self.total
    }

    /// Share answered, rounded down.
    pub fn percent(&self) -> Percentage {
        Percentage::from_ratio(self.answered, self.total)
    }
}
