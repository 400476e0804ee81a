//! Display state machine
//!
//! ```text
//!   Empty ──load_baseline──▶ BaselineLoaded ◀──reset_to_baseline── SimulationActive
//!                                  │                                     ▲
//!                                  └──────── complete_simulation ────────┘
//! ```
//!
//! Running a simulation is split in two so that the backend call can happen
//! without holding the state: [`DisplayState::begin_simulation`] validates
//! the request and issues a [`SimulationTicket`], and
//! [`DisplayState::complete_simulation`] applies the result only if that
//! ticket is still the latest one issued. Loading a baseline or resetting
//! also retires outstanding tickets, so a slow response can never overwrite
//! newer state.

use energy_series::{SeriesError, TimeSeries};
use forecast_client::{ModelMetrics, Scenario, SimulationRequest};
use tracing::debug;

use crate::baseline::BaselineForecast;
use crate::error::{DashboardError, Result};

/// Which dataset the dashboard is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    Empty,
    BaselineLoaded,
    SimulationActive,
}

/// A transient what-if forecast currently on display
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub scenario: Scenario,
    pub requested_year: i32,
    pub prediction: TimeSeries,
}

/// Proof that a simulation request passed validation, tagged with its
/// position in the request sequence
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationTicket {
    sequence: u64,
    scenario: Scenario,
    requested_year: i32,
    request: SimulationRequest,
}

impl SimulationTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn requested_year(&self) -> i32 {
        self.requested_year
    }

    /// The backend request to send for this ticket
    pub fn request(&self) -> SimulationRequest {
        self.request
    }
}

/// What happened to a completed simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result is now the active simulation
    Applied,
    /// A newer request, a reset or a baseline reload came first; the result
    /// was dropped
    Superseded,
}

/// What the dashboard should currently draw
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentDisplay<'a> {
    pub historical: &'a TimeSeries,
    /// Simulation prediction when one is active, otherwise the official one
    pub overlay: &'a TimeSeries,
    pub overlay_label: String,
    /// Always the baseline's metrics; a what-if run does not change how well
    /// the model fits
    pub metrics: &'a ModelMetrics,
    /// Scenario of the active simulation, `None` for the official forecast
    pub scenario: Option<Scenario>,
}

/// Baseline plus an optional simulation overlay
#[derive(Debug, Default)]
pub struct DisplayState {
    baseline: Option<BaselineForecast>,
    active_simulation: Option<SimulationResult>,
    issued: u64,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DisplayPhase {
        match (&self.baseline, &self.active_simulation) {
            (None, _) => DisplayPhase::Empty,
            (Some(_), None) => DisplayPhase::BaselineLoaded,
            (Some(_), Some(_)) => DisplayPhase::SimulationActive,
        }
    }

    pub fn baseline(&self) -> Option<&BaselineForecast> {
        self.baseline.as_ref()
    }

    pub fn active_simulation(&self) -> Option<&SimulationResult> {
        self.active_simulation.as_ref()
    }

    /// Install a new baseline from any state. The previous simulation and
    /// any in-flight simulation requests are discarded.
    pub fn load_baseline(&mut self, baseline: BaselineForecast) {
        if self.active_simulation.take().is_some() {
            debug!("baseline replaced, discarding active simulation");
        }
        self.issued += 1;
        self.baseline = Some(baseline);
    }

    /// Validate a simulation request against the current baseline and issue
    /// a ticket for it.
    ///
    /// Fails with [`DashboardError::NoBaseline`] before a baseline is loaded
    /// and with [`DashboardError::OutOfRange`] when `year` is not after the
    /// historical data or lies beyond the horizon. A failure leaves the state
    /// untouched.
    pub fn begin_simulation(&mut self, scenario: Scenario, year: i32) -> Result<SimulationTicket> {
        let baseline = self.baseline.as_ref().ok_or(DashboardError::NoBaseline)?;
        let years_ahead = baseline.years_ahead(year)?;
        let request =
            SimulationRequest::new(scenario, years_ahead, baseline.last_historical_year() + 1)?;

        self.issued += 1;
        Ok(SimulationTicket {
            sequence: self.issued,
            scenario,
            requested_year: year,
            request,
        })
    }

    /// Whether `ticket` is still the latest request
    pub fn is_current(&self, ticket: &SimulationTicket) -> bool {
        ticket.sequence == self.issued
    }

    /// Apply the backend's answer for `ticket`.
    ///
    /// Stale tickets are reported as [`Completion::Superseded`] and change
    /// nothing. The prediction is trimmed to the requested year; it must
    /// start right after the historical data and reach the requested year.
    pub fn complete_simulation(
        &mut self,
        ticket: &SimulationTicket,
        prediction: TimeSeries,
    ) -> Result<Completion> {
        if !self.is_current(ticket) {
            debug!(
                sequence = ticket.sequence,
                latest = self.issued,
                "dropping superseded simulation result"
            );
            return Ok(Completion::Superseded);
        }

        let baseline = self.baseline.as_ref().ok_or(DashboardError::NoBaseline)?;
        // re-checked against the baseline in place now, not the one at issue time
        baseline.years_ahead(ticket.requested_year)?;

        let prediction = prediction.truncate_to(ticket.requested_year);
        if prediction.is_empty() {
            return Err(SeriesError::EmptySeries.into());
        }
        baseline.historical().concat(&prediction)?;

        if prediction.last_year() != Some(ticket.requested_year) {
            return Err(SeriesError::InvalidSeries(format!(
                "simulation ends at {} but {} was requested",
                prediction.last_year().unwrap_or_default(),
                ticket.requested_year
            ))
            .into());
        }

        self.active_simulation = Some(SimulationResult {
            scenario: ticket.scenario,
            requested_year: ticket.requested_year,
            prediction,
        });
        Ok(Completion::Applied)
    }

    /// Drop the active simulation, if any, and retire in-flight requests.
    /// Never fails.
    pub fn reset_to_baseline(&mut self) {
        self.issued += 1;
        if self.active_simulation.take().is_some() {
            debug!("simulation reset to baseline");
        }
    }

    /// The series, label and metrics to display, or `None` before a baseline
    /// is loaded
    pub fn current_display(&self) -> Option<CurrentDisplay<'_>> {
        let baseline = self.baseline.as_ref()?;

        let (overlay, overlay_label, scenario) = match &self.active_simulation {
            Some(sim) => (
                &sim.prediction,
                simulation_label(sim.scenario),
                Some(sim.scenario),
            ),
            None => (baseline.prediction(), official_label(), None),
        };

        Some(CurrentDisplay {
            historical: baseline.historical(),
            overlay,
            overlay_label,
            metrics: baseline.metrics(),
            scenario,
        })
    }
}

/// Legend label for the official forecast
pub fn official_label() -> String {
    format!("Official forecast ({})", Scenario::Moderate)
}

/// Legend label for a simulation
pub fn simulation_label(scenario: Scenario) -> String {
    format!("Simulation ({})", scenario)
}
