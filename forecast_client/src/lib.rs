//! # Forecast Client
//!
//! Client for the energy forecasting backend. The backend fits the model and
//! stores predictions; this crate only reads what it computed, asks it for
//! transient what-if simulations and triggers its data refresh.
//!
//! | Call | Endpoint |
//! |---|---|
//! | [`ForecastClient::fetch_historical`] | `GET /api/data/energy?limit=N` |
//! | [`ForecastClient::fetch_official_prediction`] | `GET /api/prediction/latest` + `GET /api/model/metrics` |
//! | [`ForecastClient::fetch_model_metrics`] | `GET /api/model/metrics` |
//! | [`ForecastClient::simulate`] | `POST /api/predict` (never persisted) |
//! | [`ForecastClient::trigger_refresh`] | `GET /update-data` |
//!
//! ## Quick Start
//!
//! ```no_run
//! use forecast_client::{ClientConfig, ForecastClient, HttpForecastClient, Scenario, SimulationRequest};
//!
//! # async fn run() -> Result<(), forecast_client::ClientError> {
//! let client = HttpForecastClient::new(ClientConfig::default())?;
//!
//! let historical = client.fetch_historical(1000).await?;
//! let official = client.fetch_official_prediction().await?;
//!
//! let request = SimulationRequest::new(Scenario::Optimistic, 3, 2025)?;
//! let simulated = client.simulate(request).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use energy_series::TimeSeries;

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod scenario;
pub mod wire;

// Re-export commonly used types
pub use crate::config::ClientConfig;
pub use crate::error::{ClientError, Result};
pub use crate::http::HttpForecastClient;
pub use crate::models::{
    ModelMetrics, OfficialPrediction, RefreshReceipt, SimulationRequest, MAX_SIMULATION_YEARS,
};
pub use crate::scenario::Scenario;

/// Capabilities of the forecasting backend.
///
/// Every call either returns complete data or fails with
/// [`ClientError::Network`] / [`ClientError::Backend`]; nothing is retried.
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// The most recent `limit` years of recorded consumption
    async fn fetch_historical(&self, limit: usize) -> Result<TimeSeries>;

    /// The persisted official forecast, its horizon and the active model's
    /// metrics
    async fn fetch_official_prediction(&self) -> Result<OfficialPrediction>;

    async fn fetch_model_metrics(&self) -> Result<ModelMetrics>;

    /// Run a what-if forecast without persisting it
    async fn simulate(&self, request: SimulationRequest) -> Result<TimeSeries>;

    /// Ask the backend to re-ingest its source data and retrain
    async fn trigger_refresh(&self) -> Result<RefreshReceipt>;
}
