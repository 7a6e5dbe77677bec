//! Trackers that do not talk to an analytics backend

use tracing::info;

use crate::ports::Tracker;
use crate::types::Rating;

/// Records each rating as a structured log event
#[derive(Debug, Clone)]
pub struct LogTracker {
    event_name: String,
}

impl LogTracker {
    pub fn new() -> Self {
        Self::with_event_name("rating_submitted")
    }

    pub fn with_event_name(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }
}

impl Default for LogTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker for LogTracker {
    fn track(&self, rating: Rating) {
        info!(
            target: "ratingbox::analytics",
            event = %self.event_name,
            rating,
            "User rated {} star(s)",
            rating
        );
    }
}

/// Tracker used when analytics is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track(&self, _rating: Rating) {}
}
