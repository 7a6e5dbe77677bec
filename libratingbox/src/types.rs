//! Core types for RatingBox

use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

/// Number of stars chosen by the user; `0` means unset.
///
/// Values are stored exactly as selected, including ones outside `0..=5`.
pub type Rating = i64;

/// Highest rating the presentation layer offers.
pub const MAX_STARS: Rating = 5;

/// Lifecycle of a rating submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A submission is in flight
    Submitting,
    /// The last submission was accepted
    Success,
    /// The last submission failed with the submitter's reason
    Failure(SubmitError),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Success | SubmissionState::Failure(_))
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::Submitting => write!(f, "submitting"),
            SubmissionState::Success => write!(f, "success"),
            SubmissionState::Failure(reason) => write!(f, "failure: {}", reason),
        }
    }
}
