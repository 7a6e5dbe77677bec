//! Rating state
//!
//! Holds the selected rating and the submission lifecycle. Submit
//! eligibility is derived from the rating and cannot be set on its own.

use crate::types::{Rating, SubmissionState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingState {
    pub(crate) rating: Rating,
    pub(crate) submission: SubmissionState,
}

impl RatingState {
    /// Create state with no rating selected and nothing submitted
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected rating (`0` when unset)
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Current submission lifecycle state
    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// A submission may be attempted once a positive rating is selected
    pub fn is_submit_enabled(&self) -> bool {
        self.rating > 0
    }

    /// Check if a submit request would be accepted right now
    pub fn can_submit(&self) -> bool {
        self.is_submit_enabled() && !self.submission.is_submitting()
    }
}
