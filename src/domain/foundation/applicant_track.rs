//! ApplicantTrack enum for the two application tracks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Which application track an applicant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantTrack {
    Founder,
    Innovator,
}

impl ApplicantTrack {
    /// Returns the display name for this track.
    pub fn display_name(&self) -> &'static str {
        match self {
            ApplicantTrack::Founder => "Founder",
            ApplicantTrack::Innovator => "Innovator",
        }
    }
}

impl fmt::Display for ApplicantTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ApplicantTrack {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "founder" => Ok(ApplicantTrack::Founder),
            "innovator" => Ok(ApplicantTrack::Innovator),
            other => Err(ValidationError::invalid_format(
                "track",
                format!("expected 'founder' or 'innovator', got '{}'", other),
            )),
        }
    }
}
