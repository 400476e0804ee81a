//! Yearly time series
//!
//! A [`TimeSeries`] is the shared vocabulary for historical consumption data,
//! official predictions and simulation results. Years are strictly increasing
//! and values are finite; both are checked once at construction and the
//! series never changes afterwards.

use crate::{Result, SeriesError};
use serde::{Deserialize, Serialize};

/// A single yearly observation or prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub year: i32,
    pub value: f64,
}

impl DataPoint {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Immutable sequence of yearly points with strictly increasing years
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeSeries {
    points: Vec<DataPoint>,
}

impl TimeSeries {
    /// An empty series
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from `(year, value)` pairs.
    ///
    /// Fails with [`SeriesError::InvalidSeries`] when years are not strictly
    /// increasing (which also rules out duplicates) or a value is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use energy_series::{SeriesError, TimeSeries};
    ///
    /// assert!(TimeSeries::from_pairs(vec![(2020, 1.0), (2021, 2.0)]).is_ok());
    /// assert!(matches!(
    ///     TimeSeries::from_pairs(vec![(2021, 1.0), (2021, 2.0)]),
    ///     Err(SeriesError::InvalidSeries(_))
    /// ));
    /// ```
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let points: Vec<DataPoint> = pairs
            .into_iter()
            .map(|(year, value)| DataPoint::new(year, value))
            .collect();
        Self::from_points(points)
    }

    /// Build a series from already-constructed points, with the same checks
    /// as [`TimeSeries::from_pairs`]
    pub fn from_points(points: Vec<DataPoint>) -> Result<Self> {
        for point in &points {
            if !point.value.is_finite() {
                return Err(SeriesError::InvalidSeries(format!(
                    "value for year {} is not finite",
                    point.year
                )));
            }
        }

        for window in points.windows(2) {
            if window[1].year <= window[0].year {
                return Err(SeriesError::InvalidSeries(format!(
                    "years must be strictly increasing: {} followed by {}",
                    window[0].year, window[1].year
                )));
            }
        }

        Ok(Self { points })
    }

    /// Build a contiguous series where `values[i]` belongs to `start_year + i`.
    ///
    /// This is the shape the prediction endpoint returns: a bare list of
    /// numbers index-aligned to the first forecast year.
    pub fn from_index_aligned(start_year: i32, values: &[f64]) -> Result<Self> {
        Self::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| (start_year + i as i32, value)),
        )
    }

    /// Years in order
    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    /// Values in year order, index-aligned with [`TimeSeries::years`]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|p| p.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }

    /// The most recent point, or [`SeriesError::EmptySeries`]
    pub fn last_point(&self) -> Result<DataPoint> {
        self.points.last().copied().ok_or(SeriesError::EmptySeries)
    }

    /// Value recorded for `year`, if the series covers it
    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points
            .binary_search_by_key(&year, |p| p.year)
            .ok()
            .map(|idx| self.points[idx].value)
    }

    /// Whether `other` starts exactly one year after this series ends.
    ///
    /// An empty `self` is continued by anything; an empty `other` continues
    /// anything.
    pub fn is_continued_by(&self, other: &TimeSeries) -> bool {
        match (self.last_year(), other.first_year()) {
            (Some(last), Some(first)) => first == last + 1,
            _ => true,
        }
    }

    /// Append `other` to this series.
    ///
    /// Fails with [`SeriesError::NonContiguous`] unless `other` begins the
    /// year after this series ends (or this series is empty).
    pub fn concat(&self, other: &TimeSeries) -> Result<TimeSeries> {
        if let (Some(last), Some(first)) = (self.last_year(), other.first_year()) {
            if last.checked_add(1) != Some(first) {
                return Err(SeriesError::NonContiguous {
                    expected: last.saturating_add(1),
                    found: first,
                });
            }
        }

        let mut points = Vec::with_capacity(self.len() + other.len());
        points.extend_from_slice(&self.points);
        points.extend_from_slice(&other.points);
        Ok(TimeSeries { points })
    }

    /// Points up to and including `year`
    pub fn truncate_to(&self, year: i32) -> TimeSeries {
        TimeSeries {
            points: self
                .points
                .iter()
                .take_while(|p| p.year <= year)
                .copied()
                .collect(),
        }
    }

    /// Whether the years form an unbroken run with no gaps
    pub fn is_contiguous(&self) -> bool {
        self.points.windows(2).all(|w| w[1].year == w[0].year + 1)
    }
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<DataPoint>::deserialize(deserializer)?;
        TimeSeries::from_points(points).map_err(serde::de::Error::custom)
    }
}
