//! Summary statistics shown next to the charts

use energy_series::growth::{growth_percent, round_to, signed_percent};
use energy_series::{DataPoint, SeriesError, TimeSeries};
use forecast_client::{ModelMetrics, Scenario};
use serde::Serialize;

use crate::error::Result;

/// Figures for the stats cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayStats {
    /// Last recorded year the growth is measured from
    pub base_year: i32,
    pub base_value: f64,
    pub projection_year: i32,
    pub projection_value: f64,
    /// Change from the base value, rounded to one decimal
    pub growth_rate_percent: f64,
    /// Simulated value against the official prediction for the same year,
    /// rounded to one decimal. Only set for simulations the official
    /// prediction covers.
    pub change_from_official_percent: Option<f64>,
    pub accuracy_summary: String,
    pub narrative_text: String,
}

impl DisplayStats {
    /// Growth with one decimal and a leading `+` for increases, e.g. `+5.0%`
    pub fn growth_rate_display(&self) -> String {
        signed_percent(self.growth_rate_percent)
    }

    /// Projected value rounded to whole terawatt-hours, e.g. `1,050 TWh`
    pub fn projection_display(&self) -> String {
        format!("{} TWh", group_thousands(self.projection_value.round() as i64))
    }

    pub fn change_from_official_display(&self) -> Option<String> {
        self.change_from_official_percent.map(signed_percent)
    }
}

/// Computes [`DisplayStats`] from the displayed series
#[derive(Debug)]
pub struct StatsProjector;

impl StatsProjector {
    /// Stats for the official forecast: the last overlay year against the
    /// last historical year
    pub fn project(
        historical: &TimeSeries,
        overlay: &TimeSeries,
        metrics: &ModelMetrics,
    ) -> Result<DisplayStats> {
        let target = overlay.last_point()?;
        Self::project_point(historical, target, metrics)
    }

    /// Stats for a specific year of the overlay
    pub fn project_at(
        historical: &TimeSeries,
        overlay: &TimeSeries,
        metrics: &ModelMetrics,
        year: i32,
    ) -> Result<DisplayStats> {
        let value = overlay.value_at(year).ok_or_else(|| {
            SeriesError::InvalidSeries(format!("no forecast value for year {}", year))
        })?;
        Self::project_point(historical, DataPoint::new(year, value), metrics)
    }

    /// Stats for a simulation. When `official` covers the projection year the
    /// simulated value is also compared against it.
    pub fn project_scenario(
        historical: &TimeSeries,
        overlay: &TimeSeries,
        metrics: &ModelMetrics,
        scenario: Scenario,
        official: Option<&TimeSeries>,
    ) -> Result<DisplayStats> {
        let target = overlay.last_point()?;
        let base = historical.last_point()?;
        let growth = round_to(growth_percent(base.value, target.value)?, 1);

        let change_from_official = match official.and_then(|o| o.value_at(target.year)) {
            Some(official_value) => Some(round_to(
                growth_percent(official_value, target.value)?,
                1,
            )),
            None => None,
        };

        let narrative_text = format!(
            "Under the {} scenario ({}), fossil fuel consumption is projected to reach {:.2} TWh in {}. \
             That is {} of {:.1}% from {}.",
            scenario,
            scenario.description(),
            target.value,
            target.year,
            direction(growth),
            growth.abs(),
            base.year,
        );

        Ok(DisplayStats {
            base_year: base.year,
            base_value: base.value,
            projection_year: target.year,
            projection_value: target.value,
            growth_rate_percent: growth,
            change_from_official_percent: change_from_official,
            accuracy_summary: metrics.accuracy_summary(),
            narrative_text,
        })
    }

    fn project_point(
        historical: &TimeSeries,
        target: DataPoint,
        metrics: &ModelMetrics,
    ) -> Result<DisplayStats> {
        let base = historical.last_point()?;
        let growth = round_to(growth_percent(base.value, target.value)?, 1);

        let narrative_text = format!(
            "The official forecast projects fossil fuel consumption of {:.2} TWh in {}, \
             {} of {:.1}% from {}.",
            target.value,
            target.year,
            direction(growth),
            growth.abs(),
            base.year,
        );

        Ok(DisplayStats {
            base_year: base.year,
            base_value: base.value,
            projection_year: target.year,
            projection_value: target.value,
            growth_rate_percent: growth,
            change_from_official_percent: None,
            accuracy_summary: metrics.accuracy_summary(),
            narrative_text,
        })
    }
}

fn direction(growth: f64) -> &'static str {
    if growth > 0.0 {
        "an increase"
    } else if growth < 0.0 {
        "a decrease"
    } else {
        "a change"
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
