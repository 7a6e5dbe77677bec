//! Service layer for RatingBox
//!
//! - `RatingBox`: the component that owns rating state and drives submission
//! - `EventBus`: ordered change notifications for subscribers

pub mod events;
pub mod rating_box;

pub use events::{Event, EventBus, EventReceiver};
pub use rating_box::RatingBox;
