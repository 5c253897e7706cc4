//! Seams between the poll loop and its collaborators.

use crate::error::{PublishError, UpstreamError};
use crate::record::StatusRecord;
use async_trait::async_trait;

/// Something that can report the current server status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches and normalizes the current status.
    async fn fetch_status(&self) -> Result<StatusRecord, UpstreamError>;
}

/// The chat platform's presence display.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceSink: Send + Sync {
    /// Replaces the displayed activity text.
    async fn set_presence(&self, activity: &str) -> Result<(), PublishError>;
}
