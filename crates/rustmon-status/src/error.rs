//! Failures of a single poll cycle.

use std::time::Duration;

/// The upstream status API could not deliver a usable status.
#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    /// Transport failure, including timeouts.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The body does not match the provider's schema.
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

impl UpstreamError {
    /// Shorthand for a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }
}

/// The chat gateway did not accept a presence update.
#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    /// The gateway refused the update.
    #[error("presence update rejected: {0}")]
    Rejected(String),

    /// The update did not complete in time.
    #[error("presence update timed out after {0:?}")]
    Timeout(Duration),
}
