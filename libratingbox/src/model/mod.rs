//! Rating model
//!
//! The submission state machine split the same way as the UI layer:
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: pure function (State, Action) -> (State, Effects)
//!
//! Effects are data. `RatingBox` (see `service::rating_box`) executes them
//! against the collaborator ports.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::{Action, Effect};
pub use reducer::{reduce, TransitionResult};
pub use state::RatingState;
