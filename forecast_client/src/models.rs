//! Values returned by the forecasting backend

use chrono::{DateTime, NaiveDate, Utc};
use energy_series::TimeSeries;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::scenario::Scenario;

/// Largest number of years the backend will simulate in one request
pub const MAX_SIMULATION_YEARS: u32 = 10;

/// Fit quality of the active forecasting model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Accuracy as reported by the backend, or `100 - mape` when it is not
    pub accuracy_percent: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
    /// Model order, e.g. `(1,1,1)`
    pub order: String,
    /// Training date as sent by the backend (`YYYY-MM-DD`)
    pub training_date: Option<String>,
    pub model_version: Option<String>,
}

impl ModelMetrics {
    /// Build metrics, deriving accuracy from MAPE when the backend did not
    /// report it
    pub fn new(
        accuracy_percent: Option<f64>,
        mape: f64,
        order: impl Into<String>,
        training_date: Option<String>,
    ) -> Self {
        Self {
            accuracy_percent: accuracy_percent.unwrap_or(100.0 - mape),
            mape,
            order: order.into(),
            training_date,
            model_version: None,
        }
    }

    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    /// Training date parsed as a calendar date, if it is one
    pub fn training_day(&self) -> Option<NaiveDate> {
        self.training_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// `100 - mape` with one decimal, or `N/A` when MAPE exceeds 100
    pub fn accuracy_summary(&self) -> String {
        let accuracy = 100.0 - self.mape;
        if accuracy.is_finite() && accuracy >= 0.0 {
            format!("{:.1}%", accuracy)
        } else {
            "N/A".to_string()
        }
    }
}

/// The persisted forecast computed by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct OfficialPrediction {
    pub prediction: TimeSeries,
    /// How many years past the last historical year the backend forecasts
    pub max_horizon_years: u32,
    pub metrics: ModelMetrics,
}

/// A what-if forecast request.
///
/// The backend never persists these: the serialized body always carries
/// `save_to_database: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationRequest {
    pub scenario: Scenario,
    /// Number of years to forecast, starting at `start_year`
    pub years_ahead: u32,
    /// First forecast year, normally the year after the last historical one
    pub start_year: i32,
}

impl SimulationRequest {
    pub fn new(scenario: Scenario, years_ahead: u32, start_year: i32) -> Result<Self> {
        if years_ahead == 0 || years_ahead > MAX_SIMULATION_YEARS {
            return Err(ClientError::InvalidRequest(format!(
                "years ahead must be between 1 and {}, got {}",
                MAX_SIMULATION_YEARS, years_ahead
            )));
        }

        Ok(Self {
            scenario,
            years_ahead,
            start_year,
        })
    }

    /// Last year the response will cover
    pub fn end_year(&self) -> i32 {
        self.start_year + self.years_ahead as i32 - 1
    }

    pub(crate) fn body(&self) -> PredictBody {
        PredictBody {
            scenario: self.scenario.wire_name(),
            years: self.years_ahead,
            save_to_database: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictBody {
    pub scenario: &'static str,
    pub years: u32,
    pub save_to_database: bool,
}

/// Acknowledgment of a server-side data refresh
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReceipt {
    /// When this client received the acknowledgment
    pub acknowledged_at: DateTime<Utc>,
    pub message: Option<String>,
    /// Whatever the backend sent back
    pub body: serde_json::Value,
}
