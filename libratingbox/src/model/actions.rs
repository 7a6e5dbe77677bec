//! Actions and effects for the rating reducer

use crate::error::SubmitError;
use crate::types::Rating;

/// Inputs that drive the rating model
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User picked a rating (stored verbatim)
    SelectRating(Rating),

    /// User asked to submit the current rating
    RequestSubmit,

    /// The submitter reported success
    SubmitSucceeded,

    /// The submitter reported failure
    SubmitFailed(SubmitError),
}

/// Side effects requested by a transition, in the order they must be issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fire the analytics event for this rating
    Track { rating: Rating },

    /// Send the rating to the backend
    Submit { rating: Rating },
}
