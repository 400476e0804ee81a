//! # Forecast Dashboard
//!
//! Presentation core of the energy consumption forecast dashboard, with no
//! dependency on a browser or any particular chart library.
//!
//! ## Features
//!
//! - Baseline handling: historical data plus the backend's official forecast
//! - What-if simulations bounded by the configured forecast horizon
//! - Latest-wins resolution of overlapping simulation requests
//! - Chart slots that never hold more than one live renderer
//! - Summary statistics and narrative text for the stats cards
//!
//! ## Quick Start
//!
//! ```no_run
//! use forecast_client::{HttpForecastClient, Scenario};
//! use forecast_dashboard::{DashboardConfig, DashboardSession, InMemoryBackend, SimulationOutcome};
//! use std::sync::Arc;
//!
//! # async fn run() -> forecast_dashboard::Result<()> {
//! let config = DashboardConfig::from_env()?;
//! let client = Arc::new(HttpForecastClient::new(config.client.clone())?);
//! let session = DashboardSession::new(client, InMemoryBackend::new(), config);
//!
//! let baseline = session.load().await?;
//! if let Some(year) = baseline.default_year {
//!     if let SimulationOutcome::Applied(view) =
//!         session.run_simulation(Scenario::Optimistic, year).await?
//!     {
//!         println!("{}", view.stats.narrative_text);
//!     }
//! }
//! session.reset().await?;
//! # Ok(())
//! # }
//! ```

pub mod baseline;
pub mod chart;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use crate::baseline::BaselineForecast;
pub use crate::chart::{
    ChartBackend, ChartHandle, ChartPresenter, ChartSlot, ChartSpec, ChartStyle, InMemoryBackend,
    RendererId,
};
pub use crate::config::DashboardConfig;
pub use crate::error::{DashboardError, ErrorPresentation, Result};
pub use crate::session::{
    BaselineView, DashboardSession, RefreshOutcome, SimulationOutcome, SimulationView,
};
pub use crate::state::{Completion, DisplayPhase, DisplayState, SimulationResult, SimulationTicket};
pub use crate::stats::{DisplayStats, StatsProjector};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
