//! Collaborator ports and their implementations
//!
//! `RatingBox` depends on two injected capabilities:
//!
//! - [`Submitter`]: sends a rating to the backend (async, may fail)
//! - [`Tracker`]: records an analytics event for a rating (sync, fire-and-forget)
//!
//! Each port has a real implementation and a test double:
//!
//! | Port        | Real                              | Test double        |
//! |-------------|-----------------------------------|--------------------|
//! | `Submitter` | [`http::HttpSubmitter`]           | [`mock::MockSubmitter`]    |
//! | `Tracker`   | [`log::LogTracker`], [`log::NoopTracker`] | [`mock::RecordingTracker`] |
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use libratingbox::ports::{Submitter, http::HttpSubmitter};
//!
//! # async fn example() -> libratingbox::Result<()> {
//! let submitter = HttpSubmitter::new("https://api.example.com/ratings", Duration::from_secs(10))?;
//! submitter.submit(5).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{SubmitterConfig, TrackerConfig};
use crate::error::{Result, SubmitError};
use crate::types::Rating;

pub mod http;
pub mod log;

// Mock ports are available for all builds to support integration tests
pub mod mock;

/// Port that delivers a rating to the backend
///
/// At most one call is outstanding per `RatingBox`; the state machine
/// enforces that, implementations need not.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit a rating
    ///
    /// # Errors
    ///
    /// Returns a `SubmitError` describing why the backend did not accept the
    /// rating. The state machine surfaces it unchanged.
    async fn submit(&self, rating: Rating) -> std::result::Result<(), SubmitError>;

    /// Short identifier used in logs (e.g. "http", "mock")
    fn name(&self) -> &str;
}

/// Port that records an analytics event for a rating
///
/// Called synchronously on the owner's thread right before the submitter, so
/// implementations must not block.
pub trait Tracker: Send + Sync {
    fn track(&self, rating: Rating);
}

/// Build the submitter described by the configuration
///
/// # Errors
///
/// Returns a configuration error if the HTTP endpoint is invalid or the HTTP
/// client cannot be constructed.
pub fn create_submitter(config: &SubmitterConfig) -> Result<Arc<dyn Submitter>> {
    let submitter: Arc<dyn Submitter> = match config {
        SubmitterConfig::Http {
            endpoint,
            timeout_secs,
        } => Arc::new(http::HttpSubmitter::new(
            endpoint.clone(),
            Duration::from_secs(*timeout_secs),
        )?),
        SubmitterConfig::Mock {
            delay_ms,
            fail_with,
        } => {
            let delay = Duration::from_millis(*delay_ms);
            Arc::new(match fail_with {
                Some(reason) => mock::MockSubmitter::new(mock::MockConfig {
                    succeeds: false,
                    error: Some(SubmitError::other(reason.clone())),
                    delay,
                    ..Default::default()
                }),
                None => mock::MockSubmitter::with_delay(delay),
            })
        }
    };

    tracing::debug!(submitter = submitter.name(), "Created submitter");
    Ok(submitter)
}

/// Build the tracker described by the configuration
pub fn create_tracker(config: &TrackerConfig) -> Arc<dyn Tracker> {
    if config.enabled {
        Arc::new(log::LogTracker::new())
    } else {
        Arc::new(log::NoopTracker)
    }
}
