//! Error types for the forecast_dashboard crate

use energy_series::{MathError, SeriesError};
use forecast_client::ClientError;
use thiserror::Error;

/// Custom error types for the forecast_dashboard crate
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashboardError {
    /// Requested simulation year falls outside the forecast horizon
    #[error("Year {requested} is out of range: choose a year between {min} and {max}")]
    OutOfRange { requested: i32, min: i32, max: i32 },

    /// A simulation was requested before any baseline was loaded
    #[error("No baseline forecast has been loaded")]
    NoBaseline,

    /// The backend could not be reached or refused the request
    #[error("Forecast backend unavailable: {0}")]
    ClientUnavailable(#[from] ClientError),

    /// Data-shape violation
    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    /// Error from growth calculations
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

/// How a UI layer should surface an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPresentation {
    /// Broken data contract; not recoverable by the user
    HardFailure,
    /// Bad user input, shown next to the form
    InlineMessage,
    /// Transient backend trouble; the user may retry by resubmitting
    DismissibleNotice,
}

impl DashboardError {
    pub fn presentation(&self) -> ErrorPresentation {
        match self {
            DashboardError::OutOfRange { .. } | DashboardError::NoBaseline => {
                ErrorPresentation::InlineMessage
            }
            DashboardError::ClientUnavailable(ClientError::InvalidData(_)) => {
                ErrorPresentation::HardFailure
            }
            DashboardError::ClientUnavailable(ClientError::InvalidRequest(_)) => {
                ErrorPresentation::InlineMessage
            }
            DashboardError::ClientUnavailable(_) => ErrorPresentation::DismissibleNotice,
            DashboardError::Series(_) | DashboardError::Math(_) | DashboardError::Config(_) => {
                ErrorPresentation::HardFailure
            }
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DashboardError>;
