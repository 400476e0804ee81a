//! Dashboard command handlers
//!
//! A [`DashboardSession`] owns the display state and the chart presenter and
//! talks to the backend through an injected [`ForecastClient`]. Its four
//! commands mirror what a user can do on the dashboard: load, simulate,
//! reset and refresh.
//!
//! Locks are taken only around state transitions and rendering, never across
//! a backend call, so several commands may be in flight at once. Overlapping
//! simulations resolve to the most recently issued one.

use chrono::{DateTime, Utc};
use forecast_client::{ForecastClient, ModelMetrics, RefreshReceipt, Scenario};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::baseline::BaselineForecast;
use crate::chart::{ChartBackend, ChartHandle, ChartPresenter, ChartStyle};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::state::{Completion, DisplayPhase, DisplayState};
use crate::stats::{DisplayStats, StatsProjector};

/// What the dashboard shows after a baseline load
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineView {
    /// `None` when the backend has no official prediction yet
    pub stats: Option<DisplayStats>,
    /// Years offered for simulation
    pub simulation_years: Vec<i32>,
    pub default_year: Option<i32>,
    pub metrics: ModelMetrics,
    pub chart: ChartHandle,
}

/// An installed simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationView {
    pub scenario: Scenario,
    pub requested_year: i32,
    pub stats: DisplayStats,
    pub chart: ChartHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutcome {
    Applied(SimulationView),
    /// A later command took precedence; nothing changed
    Superseded,
}

/// Result of a data refresh followed by a reload
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub receipt: RefreshReceipt,
    pub baseline: BaselineView,
}

pub struct DashboardSession<C: ForecastClient + ?Sized, B: ChartBackend> {
    client: Arc<C>,
    config: DashboardConfig,
    state: Mutex<DisplayState>,
    presenter: Mutex<ChartPresenter<B>>,
    last_refresh: Mutex<Option<DateTime<Utc>>>,
}

impl<C: ForecastClient + ?Sized, B: ChartBackend> DashboardSession<C, B> {
    pub fn new(client: Arc<C>, backend: B, config: DashboardConfig) -> Self {
        Self {
            client,
            config,
            state: Mutex::new(DisplayState::new()),
            presenter: Mutex::new(ChartPresenter::new(backend)),
            last_refresh: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub async fn phase(&self) -> DisplayPhase {
        self.state.lock().await.phase()
    }

    /// Run `f` against the current display state
    pub async fn with_state<T>(&self, f: impl FnOnce(&DisplayState) -> T) -> T {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Run `f` against the chart presenter
    pub async fn with_presenter<T>(&self, f: impl FnOnce(&ChartPresenter<B>) -> T) -> T {
        let presenter = self.presenter.lock().await;
        f(&presenter)
    }

    /// When the last successful refresh was acknowledged
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.lock().await
    }

    /// Fetch history and the official forecast and make them the baseline.
    ///
    /// Any active simulation is discarded and in-flight simulations will be
    /// dropped when they return. On failure the previous state is kept.
    pub async fn load(&self) -> Result<BaselineView> {
        let (historical, official) = futures::try_join!(
            self.client.fetch_historical(self.config.historical_limit),
            self.client.fetch_official_prediction(),
        )?;

        let baseline = BaselineForecast::from_official(historical, official)?;
        let stats = if baseline.prediction().is_empty() {
            warn!("backend returned no official prediction; stats left empty");
            None
        } else {
            Some(StatsProjector::project(
                baseline.historical(),
                baseline.prediction(),
                baseline.metrics(),
            )?)
        };

        let mut state = self.state.lock().await;
        let mut presenter = self.presenter.lock().await;

        let chart = presenter.render(
            &self.config.preview_slot,
            baseline.historical(),
            baseline.prediction(),
            &ChartStyle::official(),
        );
        presenter.release(&self.config.simulation_slot);

        let view = BaselineView {
            stats,
            simulation_years: baseline.simulation_years(),
            default_year: baseline.default_simulation_year(),
            metrics: baseline.metrics().clone(),
            chart,
        };

        info!(
            historical_years = baseline.historical().len(),
            predicted_years = baseline.prediction().len(),
            horizon = baseline.max_horizon_years(),
            "baseline loaded"
        );
        state.load_baseline(baseline);

        Ok(view)
    }

    /// Ask the backend for a what-if forecast up to `year` and display it.
    ///
    /// Fails without touching the state when no baseline is loaded, `year`
    /// is outside the allowed range or the backend call fails. Returns
    /// [`SimulationOutcome::Superseded`] if another simulation, a reset or a
    /// reload was issued while this one was in flight.
    pub async fn run_simulation(&self, scenario: Scenario, year: i32) -> Result<SimulationOutcome> {
        let ticket = self.state.lock().await.begin_simulation(scenario, year)?;
        info!(
            %scenario,
            year,
            years_ahead = ticket.request().years_ahead,
            sequence = ticket.sequence(),
            "running simulation"
        );

        let response = self.client.simulate(ticket.request()).await;

        let mut state = self.state.lock().await;
        if !state.is_current(&ticket) {
            debug!(sequence = ticket.sequence(), "simulation superseded while in flight");
            return Ok(SimulationOutcome::Superseded);
        }
        let prediction = response?;

        let stats = match state.baseline() {
            Some(baseline) => StatsProjector::project_scenario(
                baseline.historical(),
                &prediction.truncate_to(year),
                baseline.metrics(),
                scenario,
                Some(baseline.prediction()),
            )?,
            None => return Ok(SimulationOutcome::Superseded),
        };

        if state.complete_simulation(&ticket, prediction)? == Completion::Superseded {
            return Ok(SimulationOutcome::Superseded);
        }

        let Some(display) = state.current_display() else {
            return Ok(SimulationOutcome::Superseded);
        };
        let chart = self.presenter.lock().await.render(
            &self.config.simulation_slot,
            display.historical,
            display.overlay,
            &ChartStyle::simulation(scenario),
        );

        info!(
            %scenario,
            year,
            growth = %stats.growth_rate_display(),
            "simulation applied"
        );

        Ok(SimulationOutcome::Applied(SimulationView {
            scenario,
            requested_year: year,
            stats,
            chart,
        }))
    }

    /// Discard the simulation and go back to the official forecast.
    ///
    /// Returns the baseline stats again, or `None` when nothing is loaded or
    /// the official prediction is empty.
    pub async fn reset(&self) -> Result<Option<DisplayStats>> {
        let mut state = self.state.lock().await;
        state.reset_to_baseline();

        let Some(display) = state.current_display() else {
            return Ok(None);
        };

        let mut presenter = self.presenter.lock().await;
        presenter.release(&self.config.simulation_slot);
        presenter.render(
            &self.config.preview_slot,
            display.historical,
            display.overlay,
            &ChartStyle::official(),
        );

        if display.overlay.is_empty() {
            return Ok(None);
        }
        let stats = StatsProjector::project(display.historical, display.overlay, display.metrics)?;
        Ok(Some(stats))
    }

    /// Have the backend re-ingest its data and retrain, then reload the
    /// baseline. The refresh can take minutes; other commands stay usable
    /// while it runs.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        info!("requesting data refresh");
        let receipt = self.client.trigger_refresh().await?;
        *self.last_refresh.lock().await = Some(receipt.acknowledged_at);
        info!(acknowledgement = ?receipt.message, "data refresh acknowledged, reloading baseline");

        let baseline = self.load().await?;
        Ok(RefreshOutcome { receipt, baseline })
    }
}
