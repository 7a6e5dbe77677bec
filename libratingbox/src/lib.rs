//! RatingBox - star rating capture with a race-free submission pipeline
//!
//! A user picks a rating and submits it. The library turns those two inputs
//! into observable state (`Idle -> Submitting -> Success | Failure`) with at
//! most one submission in flight and the analytics event always issued
//! before the network call.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod ports;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{RatingBoxError, Result, SubmitError};
pub use ports::{Submitter, Tracker};
pub use service::{Event, RatingBox};
pub use types::{Rating, SubmissionState, MAX_STARS};
