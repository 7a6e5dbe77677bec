//! Pure reducer for rating state transitions
//!
//! `(State, Action) -> (State, Vec<Effect>)`
//!
//! The reducer performs no I/O. The submit guard lives here: a request is
//! accepted only when a positive rating is selected and no submission is in
//! flight. Anything else leaves the state untouched and yields no effects.

use super::actions::{Action, Effect};
use super::state::RatingState;
use crate::types::SubmissionState;

/// New state plus the effects to run, in order
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub state: RatingState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: RatingState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    /// State change with no side effects
    pub fn state_only(state: RatingState) -> Self {
        Self::new(state, Vec::new())
    }
}

/// Apply an action to the rating state
pub fn reduce(state: RatingState, action: Action) -> TransitionResult {
    match action {
        Action::SelectRating(rating) => TransitionResult::state_only(RatingState { rating, ..state }),

        Action::RequestSubmit if state.can_submit() => {
            let rating = state.rating;
            TransitionResult::new(
                RatingState {
                    submission: SubmissionState::Submitting,
                    ..state
                },
                // Tracking is issued before the network call
                vec![Effect::Track { rating }, Effect::Submit { rating }],
            )
        }

        Action::RequestSubmit => TransitionResult::state_only(state),

        Action::SubmitSucceeded if state.submission.is_submitting() => {
            TransitionResult::state_only(RatingState {
                submission: SubmissionState::Success,
                ..state
            })
        }

        Action::SubmitFailed(reason) if state.submission.is_submitting() => {
            TransitionResult::state_only(RatingState {
                submission: SubmissionState::Failure(reason),
                ..state
            })
        }

        // Outcomes only resolve an in-flight submission
        Action::SubmitSucceeded | Action::SubmitFailed(_) => TransitionResult::state_only(state),
    }
}
