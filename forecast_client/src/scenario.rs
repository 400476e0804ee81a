//! Simulation scenarios and their wire names

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Qualitative GDP-growth assumption passed to the forecasting backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// High GDP growth
    Optimistic,
    /// Stable GDP growth; the official forecast uses this one
    #[default]
    Moderate,
    /// Low GDP growth
    Pessimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Optimistic,
        Scenario::Moderate,
        Scenario::Pessimistic,
    ];

    /// Name the backend expects in the `scenario` field
    pub fn wire_name(self) -> &'static str {
        match self {
            Scenario::Optimistic => "optimis",
            Scenario::Moderate => "moderat",
            Scenario::Pessimistic => "pesimistis",
        }
    }

    /// Parse a backend scenario name
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.wire_name() == name)
    }

    /// Short description of the growth assumption
    pub fn description(self) -> &'static str {
        match self {
            Scenario::Optimistic => "high GDP growth",
            Scenario::Moderate => "stable GDP growth",
            Scenario::Pessimistic => "low GDP growth",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::Optimistic => "optimistic",
            Scenario::Moderate => "moderate",
            Scenario::Pessimistic => "pessimistic",
        };
        f.write_str(name)
    }
}

impl FromStr for Scenario {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "optimistic" => Ok(Scenario::Optimistic),
            "moderate" => Ok(Scenario::Moderate),
            "pessimistic" => Ok(Scenario::Pessimistic),
            other => Scenario::from_wire(other).ok_or_else(|| {
                ClientError::InvalidRequest(format!("Unknown scenario: {}", s))
            }),
        }
    }
}
