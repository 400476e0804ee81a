//! Error types for the forecast_client crate

use energy_series::SeriesError;
use thiserror::Error;

/// Failures from a backend call
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, broken body stream
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered, but not with a success body
    #[error("Backend error ({code}): {message}")]
    Backend { code: u16, message: String },

    /// The backend answered with data that breaks series invariants
    #[error("Invalid data from backend: {0}")]
    InvalidData(#[from] SeriesError),

    /// The request was rejected before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Network and backend failures are the same "unavailable" outcome for
    /// callers that do not care which side broke
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Backend { .. })
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}
