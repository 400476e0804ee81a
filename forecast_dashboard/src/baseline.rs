//! The official forecast a dashboard session is anchored on

use energy_series::{SeriesError, TimeSeries};
use forecast_client::{ModelMetrics, OfficialPrediction, MAX_SIMULATION_YEARS};
use std::ops::RangeInclusive;

use crate::error::{DashboardError, Result};

/// Historical data plus the server-computed prediction, its horizon and the
/// fitted model's metrics.
///
/// Built once per load and replaced wholesale; never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineForecast {
    historical: TimeSeries,
    prediction: TimeSeries,
    max_horizon_years: u32,
    metrics: ModelMetrics,
}

impl BaselineForecast {
    /// Create a baseline.
    ///
    /// `historical` must not be empty. A non-empty `prediction` must start
    /// the year after the last historical year and have no gaps.
    pub fn new(
        historical: TimeSeries,
        prediction: TimeSeries,
        max_horizon_years: u32,
        metrics: ModelMetrics,
    ) -> Result<Self> {
        if historical.is_empty() {
            return Err(SeriesError::EmptySeries.into());
        }

        if !prediction.is_contiguous() {
            return Err(SeriesError::InvalidSeries(
                "official prediction has gaps between years".to_string(),
            )
            .into());
        }

        // only the contiguity check matters here; the joined series is discarded
        historical.concat(&prediction)?;

        Ok(Self {
            historical,
            prediction,
            max_horizon_years,
            metrics,
        })
    }

    pub fn from_official(historical: TimeSeries, official: OfficialPrediction) -> Result<Self> {
        Self::new(
            historical,
            official.prediction,
            official.max_horizon_years,
            official.metrics,
        )
    }

    pub fn historical(&self) -> &TimeSeries {
        &self.historical
    }

    pub fn prediction(&self) -> &TimeSeries {
        &self.prediction
    }

    pub fn max_horizon_years(&self) -> u32 {
        self.max_horizon_years
    }

    /// Horizon actually offered for simulations, capped at what the backend
    /// accepts in one request
    pub fn effective_horizon_years(&self) -> u32 {
        self.max_horizon_years.min(MAX_SIMULATION_YEARS)
    }

    pub fn metrics(&self) -> &ModelMetrics {
        &self.metrics
    }

    /// Last year with recorded data
    pub fn last_historical_year(&self) -> i32 {
        // non-empty by construction
        self.historical.last_year().unwrap_or_default()
    }

    /// Years a simulation may target: strictly after the historical data and
    /// no further than the effective horizon. Empty when no year qualifies.
    pub fn simulation_bounds(&self) -> RangeInclusive<i32> {
        let last = self.last_historical_year();
        let horizon = i32::try_from(self.effective_horizon_years()).unwrap_or(i32::MAX);

        match last.checked_add(1) {
            Some(first) => first..=last.saturating_add(horizon),
            None => RangeInclusive::new(1, 0),
        }
    }

    /// Validate a requested simulation year, returning how many years past
    /// the historical end it lies
    pub fn years_ahead(&self, requested_year: i32) -> Result<u32> {
        let bounds = self.simulation_bounds();
        if !bounds.contains(&requested_year) {
            return Err(DashboardError::OutOfRange {
                requested: requested_year,
                min: *bounds.start(),
                max: *bounds.end(),
            });
        }

        Ok((requested_year - self.last_historical_year()) as u32)
    }

    /// Selectable simulation years, in order
    pub fn simulation_years(&self) -> Vec<i32> {
        self.simulation_bounds().collect()
    }

    /// The year pre-selected for a new simulation: the furthest one allowed
    pub fn default_simulation_year(&self) -> Option<i32> {
        self.simulation_years().last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> ModelMetrics {
        ModelMetrics::new(None, 2.0, "(1,1,1)", None)
    }

    fn historical() -> TimeSeries {
        TimeSeries::from_pairs(vec![(2023, 990.0), (2024, 1000.0)]).unwrap()
    }

    #[test]
    fn test_bounds_and_years() {
        let prediction = TimeSeries::from_index_aligned(2025, &[1010.0, 1020.0, 1030.0]).unwrap();
        let baseline = BaselineForecast::new(historical(), prediction, 5, metrics()).unwrap();

        assert_eq!(baseline.simulation_bounds(), 2025..=2029);
        assert_eq!(baseline.simulation_years(), vec![2025, 2026, 2027, 2028, 2029]);
        assert_eq!(baseline.default_simulation_year(), Some(2029));
        assert_eq!(baseline.years_ahead(2027).unwrap(), 3);
    }

    #[test]
    fn test_rejects_misaligned_prediction() {
        let prediction = TimeSeries::from_pairs(vec![(2026, 1020.0)]).unwrap();
        let err = BaselineForecast::new(historical(), prediction, 5, metrics()).unwrap_err();
        assert_eq!(
            err,
            DashboardError::Series(SeriesError::NonContiguous {
                expected: 2025,
                found: 2026
            })
        );

        let gappy = TimeSeries::from_pairs(vec![(2025, 1.0), (2027, 2.0)]).unwrap();
        assert!(matches!(
            BaselineForecast::new(historical(), gappy, 5, metrics()),
            Err(DashboardError::Series(SeriesError::InvalidSeries(_)))
        ));
    }

    #[test]
    fn test_rejects_empty_historical() {
        let err =
            BaselineForecast::new(TimeSeries::empty(), TimeSeries::empty(), 5, metrics()).unwrap_err();
        assert_eq!(err, DashboardError::Series(SeriesError::EmptySeries));
    }

    #[test]
    fn test_zero_horizon_allows_nothing() {
        let baseline =
            BaselineForecast::new(historical(), TimeSeries::empty(), 0, metrics()).unwrap();
        assert!(baseline.simulation_years().is_empty());
        assert_eq!(baseline.default_simulation_year(), None);
        assert!(matches!(
            baseline.years_ahead(2025),
            Err(DashboardError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_horizon_is_capped_at_backend_limit() {
        let baseline =
            BaselineForecast::new(historical(), TimeSeries::empty(), 12, metrics()).unwrap();

        assert_eq!(baseline.max_horizon_years(), 12);
        assert_eq!(baseline.effective_horizon_years(), 10);
        assert_eq!(baseline.simulation_bounds(), 2025..=2034);
        assert_eq!(baseline.default_simulation_year(), Some(2034));
        assert_eq!(baseline.years_ahead(2034).unwrap(), 10);
        assert_eq!(
            baseline.years_ahead(2036).unwrap_err(),
            DashboardError::OutOfRange {
                requested: 2036,
                min: 2025,
                max: 2034
            }
        );
    }

    #[test]
    fn test_huge_horizon_does_not_overflow() {
        let baseline =
            BaselineForecast::new(historical(), TimeSeries::empty(), u32::MAX, metrics()).unwrap();
        assert_eq!(baseline.simulation_bounds(), 2025..=2034);

        let late = TimeSeries::from_pairs(vec![(i32::MAX - 3, 1.0)]).unwrap();
        let baseline = BaselineForecast::new(late, TimeSeries::empty(), 10, metrics()).unwrap();
        assert_eq!(baseline.simulation_bounds(), (i32::MAX - 2)..=i32::MAX);

        let last = TimeSeries::from_pairs(vec![(i32::MAX, 1.0)]).unwrap();
        let baseline = BaselineForecast::new(last, TimeSeries::empty(), 10, metrics()).unwrap();
        assert!(baseline.simulation_years().is_empty());
        assert!(matches!(
            baseline.years_ahead(i32::MAX),
            Err(DashboardError::OutOfRange { .. })
        ));
    }
}
