//! Application-wide error types using thiserror.

use poise::serenity_prelude as serenity;
use rustmon_common::RustmonError;
use rustmon_status::UpstreamError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] RustmonError),

    /// The Discord token was rejected before the bot connected.
    #[error("Token is not valid: {0}")]
    Credential(String),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// The status HTTP client could not be built.
    #[error("Status client error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
