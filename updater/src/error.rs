//! Error handling for the trip weather updater

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Network failure, timeout, or non-success status from the forecast
    /// provider; recovered by skipping the waypoint for the run
    #[error("Forecast request failed: {0}")]
    Fetch(String),

    /// Provider payload did not match the requested schema
    #[error("Malformed forecast payload: {0}")]
    MalformedResponse(String),

    /// Destination document is missing a marker or the timestamp anchor;
    /// fatal before any write
    #[error("Template mismatch: {0}")]
    TemplateMismatch(String),

    /// A window day ended up with no waypoint data after all fetches
    #[error("Incomplete weather data: {0}")]
    IncompleteData(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Fetch(format!("request timed out: {}", err))
        } else if err.is_decode() {
            AppError::MalformedResponse(err.to_string())
        } else {
            AppError::Fetch(err.to_string())
        }
    }
}

/// Result type alias for the updater
pub type AppResult<T> = Result<T, AppError>;
