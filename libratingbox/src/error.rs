//! Error types for RatingBox

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RatingBoxError>;

#[derive(Error, Debug)]
pub enum RatingBoxError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Submission error: {0}")]
    Submit(#[from] SubmitError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RatingBoxError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RatingBoxError::InvalidInput(_) => 3,
            RatingBoxError::Config(_) => 2,
            RatingBoxError::Submit(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Reason a rating submission failed
///
/// The submission state machine carries this value through to
/// `SubmissionState::Failure` untouched; only submitter implementations
/// and the presentation layer look inside it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("{message}")]
    Other { message: String },
}

impl SubmitError {
    pub fn network(message: impl Into<String>) -> Self {
        SubmitError::Network {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        SubmitError::Other {
            message: message.into(),
        }
    }
}
