//! HTTP submitter
//!
//! POSTs `{"rating": n}` as JSON to a configured endpoint. Any 2xx response
//! counts as accepted.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{ConfigError, Result, SubmitError};
use crate::ports::Submitter;
use crate::types::Rating;

/// Longest server message kept in a `Rejected` error
const MAX_REJECTION_MESSAGE: usize = 512;

#[derive(Debug, Serialize)]
struct RatingRequest {
    rating: Rating,
}

/// Submitter backed by a JSON HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl HttpSubmitter {
    /// Create a submitter for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the endpoint is not an absolute
    /// URL or the HTTP client cannot be built.
    pub fn new(endpoint: impl AsRef<str>, request_timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref()).map_err(|e| {
            ConfigError::InvalidValue(format!(
                "submitter.endpoint '{}' is not a valid URL: {}",
                endpoint.as_ref(),
                e
            ))
        })?;

        let client = Client::builder()
            .build()
            .map_err(|e| ConfigError::InvalidValue(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            request_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, rating: Rating) -> std::result::Result<(), SubmitError> {
        debug!(endpoint = %self.endpoint, rating, "Submitting rating");

        let response = timeout(
            self.request_timeout,
            self.client
                .post(self.endpoint.clone())
                .json(&RatingRequest { rating })
                .send(),
        )
        .await
        .map_err(|_| SubmitError::Timeout {
            millis: self.request_timeout.as_millis() as u64,
        })?
        .map_err(|e| SubmitError::network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut message = response.text().await.unwrap_or_default();
        if message.len() > MAX_REJECTION_MESSAGE {
            let mut cut = MAX_REJECTION_MESSAGE;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }
        if message.is_empty() {
            message = status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string();
        }

        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}
