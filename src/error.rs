//! Error types for the page renderer

use thiserror::Error;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or rendering a page
#[derive(Error, Debug)]
pub enum Error {
    /// The profile document was served with a non-success status
    #[error("Failed to load profile document: HTTP {status}")]
    LoadError { status: u16 },

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The response body was not a valid profile document
    #[error("Failed to parse profile document: {0}")]
    ParseError(String),

    /// Failed to render content into the page
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::ConfigError(format!("invalid URL: {}", err))
    }
}
