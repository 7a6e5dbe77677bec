//! Change notifications for rating state
//!
//! This module provides an in-process event bus that pushes every rating and
//! submission change to subscribers in the order the changes happen.
//!
//! # Architecture
//!
//! The event bus uses `tokio::sync::broadcast` for multi-subscriber support.
//! `RatingBox` emits an event for each mutation; any number of subscribers
//! (TUI, logging, tests) can consume them.
//!
//! # Non-Blocking Behavior
//!
//! If no subscribers exist, events are dropped immediately. A subscriber that
//! falls more than `capacity` events behind receives `RecvError::Lagged`
//! instead of silently missing events.
//!
//! # Example
//!
//! ```
//! use libratingbox::service::events::{Event, EventBus};
//!
//! # async fn example() {
//! let event_bus = EventBus::new(100);
//! let mut receiver = event_bus.subscribe();
//!
//! event_bus.emit(Event::RatingChanged { rating: 4 });
//!
//! if let Ok(event) = receiver.recv().await {
//!     println!("Received: {:?}", event);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{Rating, SubmissionState};

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Default per-subscriber buffer
pub const DEFAULT_CAPACITY: usize = 100;

/// Event bus for distributing state changes
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the specified capacity
    ///
    /// The capacity determines how many events can be buffered per subscriber
    /// before a lagging subscriber starts losing the oldest ones.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events
    ///
    /// Returns a receiver that will receive all events emitted after
    /// subscription.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: Event) {
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Observable changes of a `RatingBox`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A rating was selected
    RatingChanged {
        /// The rating as selected
        rating: Rating,
    },

    /// Submit eligibility was recomputed after a rating change
    SubmitEnabledChanged {
        /// Whether a submit request would pass the rating check
        enabled: bool,
    },

    /// The submission lifecycle moved to a new state
    SubmissionChanged {
        /// The state just entered
        state: SubmissionState,
    },
}

impl Event {
    /// The submission state carried by this event, if any
    pub fn submission_state(&self) -> Option<&SubmissionState> {
        match self {
            Event::SubmissionChanged { state } => Some(state),
            _ => None,
        }
    }
}
