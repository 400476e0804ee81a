//! Dashboard settings
//!
//! Defaults work against a backend on `http://127.0.0.1:5000`. Values can be
//! loaded from JSON (missing fields keep their defaults) or overridden from
//! the environment:
//!
//! | Variable | Field |
//! |---|---|
//! | `ENERGY_DASHBOARD_BASE_URL` | `client.base_url` |
//! | `ENERGY_DASHBOARD_TIMEOUT_SECS` | `client.timeout_secs` |
//! | `ENERGY_DASHBOARD_HISTORY_LIMIT` | `historical_limit` |
//! | `ENERGY_DASHBOARD_DEFAULT_HORIZON` | `client.default_horizon_years` |

use forecast_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::chart::ChartSlot;
use crate::error::{DashboardError, Result};

pub const BASE_URL_VAR: &str = "ENERGY_DASHBOARD_BASE_URL";
pub const TIMEOUT_VAR: &str = "ENERGY_DASHBOARD_TIMEOUT_SECS";
pub const HISTORY_LIMIT_VAR: &str = "ENERGY_DASHBOARD_HISTORY_LIMIT";
pub const DEFAULT_HORIZON_VAR: &str = "ENERGY_DASHBOARD_DEFAULT_HORIZON";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub client: ClientConfig,
    /// How many years of history to request on load
    pub historical_limit: usize,
    pub preview_slot: ChartSlot,
    pub simulation_slot: ChartSlot,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            historical_limit: 1000,
            preview_slot: ChartSlot::PREVIEW,
            simulation_slot: ChartSlot::SIMULATION,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by the `ENERGY_DASHBOARD_*` variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`DashboardConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.client.base_url = base_url;
        }
        if let Some(secs) = parse_var(&lookup, TIMEOUT_VAR)? {
            config.client.timeout_secs = secs;
        }
        if let Some(limit) = parse_var(&lookup, HISTORY_LIMIT_VAR)? {
            config.historical_limit = limit;
        }
        if let Some(years) = parse_var(&lookup, DEFAULT_HORIZON_VAR)? {
            config.client.default_horizon_years = years;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DashboardError::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.client.base_url.trim().is_empty() {
            return Err(DashboardError::Config("base url must not be empty".to_string()));
        }
        if self.client.timeout_secs == 0 {
            return Err(DashboardError::Config("timeout must be at least one second".to_string()));
        }
        if self.historical_limit == 0 {
            return Err(DashboardError::Config(
                "historical limit must be positive".to_string(),
            ));
        }
        if self.preview_slot == self.simulation_slot {
            return Err(DashboardError::Config(format!(
                "preview and simulation charts share the slot '{}'",
                self.preview_slot
            )));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| DashboardError::Config(format!("{} is not a valid number: '{}'", name, raw))),
        None => Ok(None),
    }
}
