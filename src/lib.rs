//! # Energy Dashboard
//!
//! Facade over the workspace crates:
//!
//! - [`energy_series`]: yearly time series and growth math
//! - [`forecast_client`]: the forecasting backend's HTTP API
//! - [`forecast_dashboard`]: display state, charts and stats
//!
//! ## Example
//!
//! ```
//! use energy_dashboard_workspace::prelude::*;
//!
//! let historical = TimeSeries::from_pairs(vec![(2024, 1000.0)]).unwrap();
//! let official = TimeSeries::from_pairs(vec![(2025, 1050.0)]).unwrap();
//! let metrics = ModelMetrics::new(None, 3.5, "(1,1,1)", None);
//!
//! let stats = StatsProjector::project(&historical, &official, &metrics).unwrap();
//! assert_eq!(stats.growth_rate_display(), "+5.0%");
//! ```

pub use energy_series;
pub use forecast_client;
pub use forecast_dashboard;

/// The types most dashboards need
pub mod prelude {
    pub use energy_series::{DataPoint, TimeSeries};
    pub use forecast_client::{
        ClientConfig, ForecastClient, HttpForecastClient, ModelMetrics, Scenario,
        SimulationRequest,
    };
    pub use forecast_dashboard::{
        ChartBackend, ChartSlot, DashboardConfig, DashboardError, DashboardSession,
        DisplayPhase, DisplayStats, InMemoryBackend, SimulationOutcome, StatsProjector,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_builds_a_session() {
        let config = DashboardConfig::default();
        let client = HttpForecastClient::new(config.client.clone()).unwrap();
        let session = DashboardSession::new(
            std::sync::Arc::new(client),
            InMemoryBackend::new(),
            config,
        );
        assert_eq!(session.config().historical_limit, 1000);
    }
}
