//! Application-wide error type shared by the workspace crates.

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, RustmonError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum RustmonError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RustmonError {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
