//! Mock port implementations for testing
//!
//! This module provides a configurable mock submitter that can simulate
//! successes, failures and delays, and a recording tracker. Both can share a
//! [`CallLog`] so tests can check the order in which the ports were called.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::SubmitError;
use crate::ports::{Submitter, Tracker};
use crate::types::Rating;

/// A call made to one of the ports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortCall {
    Track(Rating),
    Submit(Rating),
}

/// Ordered record of port calls shared between test doubles
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<PortCall>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: PortCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// All calls so far, oldest first
    pub fn calls(&self) -> Vec<PortCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Configuration for mock submitter behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Submitter name reported in logs
    pub name: String,

    /// Whether submissions should succeed
    pub succeeds: bool,

    /// Error to return on failure
    pub error: Option<SubmitError>,

    /// Delay before completing (simulates network latency)
    pub delay: Duration,

    /// Number of times submit has been called
    pub call_count: Arc<Mutex<usize>>,

    /// Ratings that have been submitted (for verification)
    pub submitted: Arc<Mutex<Vec<Rating>>>,

    /// Shared call log, if ordering against other ports matters
    pub call_log: Option<CallLog>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            succeeds: true,
            error: None,
            delay: Duration::from_millis(0),
            call_count: Arc::new(Mutex::new(0)),
            submitted: Arc::new(Mutex::new(Vec::new())),
            call_log: None,
        }
    }
}

/// Mock submitter for testing
///
/// Cloning shares the counters, so a test can keep a handle after passing
/// the submitter into a `RatingBox`.
#[derive(Debug, Clone)]
pub struct MockSubmitter {
    config: MockConfig,
}

impl MockSubmitter {
    /// Create a new mock submitter with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Create a mock submitter that always succeeds
    pub fn success() -> Self {
        Self::new(MockConfig::default())
    }

    /// Create a mock submitter that always fails with `error`
    pub fn failure(error: SubmitError) -> Self {
        Self::new(MockConfig {
            succeeds: false,
            error: Some(error),
            ..Default::default()
        })
    }

    /// Create a succeeding mock submitter with a delay
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(MockConfig {
            delay,
            ..Default::default()
        })
    }

    /// Record calls into a shared log
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.config.call_log = Some(log);
        self
    }

    /// Get the number of times submit was called
    pub fn call_count(&self) -> usize {
        *self.config.call_count.lock().unwrap()
    }

    /// Get all ratings that were submitted
    pub fn submitted(&self) -> Vec<Rating> {
        self.config.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Submitter for MockSubmitter {
    async fn submit(&self, rating: Rating) -> Result<(), SubmitError> {
        *self.config.call_count.lock().unwrap() += 1;
        self.config.submitted.lock().unwrap().push(rating);
        if let Some(log) = &self.config.call_log {
            log.record(PortCall::Submit(rating));
        }

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if self.config.succeeds {
            Ok(())
        } else {
            Err(self
                .config
                .error
                .clone()
                .unwrap_or_else(|| SubmitError::other("Mock submission failed")))
        }
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

type TrackHook = Arc<dyn Fn(Rating) + Send + Sync>;

/// Tracker that remembers every rating it was asked to track
#[derive(Clone, Default)]
pub struct RecordingTracker {
    tracked: Arc<Mutex<Vec<Rating>>>,
    call_log: Option<CallLog>,
    on_track: Option<TrackHook>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record calls into a shared log
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.call_log = Some(log);
        self
    }

    /// Run `hook` inside every `track` call
    pub fn on_track(mut self, hook: impl Fn(Rating) + Send + Sync + 'static) -> Self {
        self.on_track = Some(Arc::new(hook));
        self
    }

    /// All tracked ratings, oldest first
    pub fn tracked(&self) -> Vec<Rating> {
        self.tracked.lock().unwrap().clone()
    }

    pub fn last_tracked(&self) -> Option<Rating> {
        self.tracked.lock().unwrap().last().copied()
    }
}

impl Tracker for RecordingTracker {
    fn track(&self, rating: Rating) {
        self.tracked.lock().unwrap().push(rating);
        if let Some(log) = &self.call_log {
            log.record(PortCall::Track(rating));
        }
        if let Some(hook) = &self.on_track {
            hook(rating);
        }
    }
}
