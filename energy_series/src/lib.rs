//! # Energy Series
//!
//! Yearly time series for energy consumption data and the small amount of
//! arithmetic the dashboard derives from them.
//!
//! - [`TimeSeries`]: an immutable, strictly year-ordered sequence of points
//! - [`growth`]: growth-rate and rounding helpers used for display statistics
//!
//! ## Example
//!
//! ```
//! use energy_series::TimeSeries;
//!
//! let historical = TimeSeries::from_pairs(vec![(2023, 980.0), (2024, 1000.0)]).unwrap();
//! let predicted = TimeSeries::from_pairs(vec![(2025, 1010.0)]).unwrap();
//!
//! let combined = historical.concat(&predicted).unwrap();
//! assert_eq!(combined.years(), vec![2023, 2024, 2025]);
//! ```

use thiserror::Error;

pub mod growth;
pub mod series;

pub use series::{DataPoint, TimeSeries};

/// Data-shape violations for yearly series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Series is not contiguous: expected first year {expected}, found {found}")]
    NonContiguous { expected: i32, found: i32 },

    #[error("Series is empty")]
    EmptySeries,
}

/// Errors from the growth and rounding helpers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for series operations
pub type Result<T> = std::result::Result<T, SeriesError>;
