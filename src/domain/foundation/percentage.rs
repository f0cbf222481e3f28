//! Completion percentage for progress displays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number percentage between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const HUNDRED: Self = Self(100);

    /// Share of `part` in `whole`, rounded down. An empty whole counts as done.
    pub fn from_ratio(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::HUNDRED;
        }
        let part = part.min(whole);
        // part <= whole, so the quotient is at most 100.
        Self(((part * 100) / whole) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
