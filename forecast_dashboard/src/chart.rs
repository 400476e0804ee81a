//! Chart specs and the renderer lifecycle for the dashboard's chart slots
//!
//! A slot holds at most one live renderer. [`ChartPresenter::render`] always
//! destroys the renderer already bound to a slot before creating the new one,
//! so re-rendering never leaks.

use energy_series::TimeSeries;
use forecast_client::Scenario;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::state::{official_label, simulation_label};

/// Named rendering target
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSlot(Cow<'static, str>);

impl ChartSlot {
    /// Where the official forecast is drawn
    pub const PREVIEW: ChartSlot = ChartSlot(Cow::Borrowed("preview-chart"));
    /// Where a simulation is drawn
    pub const SIMULATION: ChartSlot = ChartSlot(Cow::Borrowed("sim-chart"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier a backend hands out for each renderer it creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RendererId(pub u64);

/// A renderer bound to a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartHandle {
    pub slot: ChartSlot,
    pub id: RendererId,
}

/// Line appearance of one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub label: String,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_width: u8,
    /// Dash and gap lengths, `None` for a solid line
    pub dash: Option<[u8; 2]>,
    pub point_radius: u8,
    pub point_color: Option<&'static str>,
    pub fill: bool,
    /// Kind of value, shown in tooltips ("actual", "forecast", "simulation")
    pub kind: &'static str,
}

impl SeriesStyle {
    /// Recorded data, shared by both slots
    pub fn historical() -> Self {
        Self {
            label: "Historical data".to_string(),
            border_color: "#2196F3",
            background_color: "rgba(33, 150, 243, 0.1)",
            border_width: 2,
            dash: None,
            point_radius: 3,
            point_color: None,
            fill: false,
            kind: "actual",
        }
    }
}

/// Style of the overlay series on a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub overlay: SeriesStyle,
}

impl ChartStyle {
    pub fn official() -> Self {
        Self {
            overlay: SeriesStyle {
                label: official_label(),
                border_color: "#53B863",
                background_color: "transparent",
                border_width: 3,
                dash: Some([5, 5]),
                point_radius: 5,
                point_color: Some("#ff69b4"),
                fill: false,
                kind: "forecast",
            },
        }
    }

    pub fn simulation(scenario: Scenario) -> Self {
        let (border_color, background_color) = match scenario {
            Scenario::Optimistic => ("#2e7d32", "rgba(46, 125, 50, 0.12)"),
            Scenario::Moderate => ("#ffc107", "rgba(255, 193, 7, 0.12)"),
            Scenario::Pessimistic => ("#e53935", "rgba(229, 57, 53, 0.12)"),
        };

        Self {
            overlay: SeriesStyle {
                label: simulation_label(scenario),
                border_color,
                background_color,
                border_width: 3,
                dash: Some([6, 4]),
                point_radius: 6,
                point_color: Some(border_color),
                fill: true,
                kind: "simulation",
            },
        }
    }
}

/// One line on a chart, padded with `None` outside its own years
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub style: SeriesStyle,
    pub values: Vec<Option<f64>>,
}

/// Everything a renderer needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Historical years followed by overlay years
    pub labels: Vec<i32>,
    pub datasets: Vec<Dataset>,
    pub x_title: &'static str,
    pub y_title: &'static str,
}

impl ChartSpec {
    /// Lay out `historical` and `overlay` on a shared year axis. Every dataset
    /// has one entry per label. An empty overlay produces a chart with only
    /// the historical line.
    pub fn build(historical: &TimeSeries, overlay: &TimeSeries, style: &ChartStyle) -> Self {
        let mut labels = historical.years();
        labels.extend(overlay.years());

        let mut datasets = vec![Dataset {
            style: SeriesStyle::historical(),
            values: historical
                .values()
                .into_iter()
                .map(Some)
                .chain(std::iter::repeat(None).take(overlay.len()))
                .collect(),
        }];

        if !overlay.is_empty() {
            let values = std::iter::repeat(None)
                .take(historical.len())
                .chain(overlay.values().into_iter().map(Some))
                .collect();
            datasets.push(Dataset {
                style: style.overlay.clone(),
                values,
            });
        }

        Self {
            labels,
            datasets,
            x_title: "Year",
            y_title: "Fossil fuel consumption (TWh)",
        }
    }

    /// Tooltip text for a point, or `None` where the dataset has no value
    pub fn tooltip(&self, dataset: usize, index: usize) -> Option<String> {
        let dataset = self.datasets.get(dataset)?;
        let year = self.labels.get(index)?;
        let value = (*dataset.values.get(index)?)?;

        Some(format!(
            "Year {}: {}: {:.2} TWh ({})",
            year, dataset.style.label, value, dataset.style.kind
        ))
    }
}

/// Something that can draw a [`ChartSpec`] into a slot
pub trait ChartBackend {
    fn create(&mut self, slot: &ChartSlot, spec: &ChartSpec) -> RendererId;

    fn destroy(&mut self, id: RendererId);
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    live: BTreeMap<RendererId, (ChartSlot, ChartSpec)>,
    destroyed: Vec<RendererId>,
}

/// Headless backend that records what was drawn.
///
/// Clones share one registry, so a test can keep a clone to inspect the
/// backend owned by a presenter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    registry: Arc<Mutex<Registry>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_registry<T>(&self, f: impl FnOnce(&mut Registry) -> T) -> T {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut registry)
    }

    /// Renderers created and not yet destroyed, across all slots
    pub fn live_count(&self) -> usize {
        self.with_registry(|r| r.live.len())
    }

    /// Live renderers in `slot`
    pub fn live_in(&self, slot: &ChartSlot) -> Vec<RendererId> {
        self.with_registry(|r| {
            r.live
                .iter()
                .filter(|(_, (s, _))| s == slot)
                .map(|(id, _)| *id)
                .collect()
        })
    }

    pub fn destroyed_count(&self) -> usize {
        self.with_registry(|r| r.destroyed.len())
    }

    /// Spec of a live renderer
    pub fn spec(&self, id: RendererId) -> Option<ChartSpec> {
        self.with_registry(|r| r.live.get(&id).map(|(_, spec)| spec.clone()))
    }

    /// Spec currently drawn in `slot`
    pub fn spec_in(&self, slot: &ChartSlot) -> Option<ChartSpec> {
        self.with_registry(|r| {
            r.live
                .values()
                .find(|(s, _)| s == slot)
                .map(|(_, spec)| spec.clone())
        })
    }
}

impl ChartBackend for InMemoryBackend {
    fn create(&mut self, slot: &ChartSlot, spec: &ChartSpec) -> RendererId {
        self.with_registry(|r| {
            r.next_id += 1;
            let id = RendererId(r.next_id);
            r.live.insert(id, (slot.clone(), spec.clone()));
            id
        })
    }

    fn destroy(&mut self, id: RendererId) {
        self.with_registry(|r| {
            if r.live.remove(&id).is_some() {
                r.destroyed.push(id);
            }
        })
    }
}

/// Binds renderers to slots and releases them before replacing
#[derive(Debug)]
pub struct ChartPresenter<B: ChartBackend> {
    backend: B,
    bound: HashMap<ChartSlot, ChartHandle>,
}

impl<B: ChartBackend> ChartPresenter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bound: HashMap::new(),
        }
    }

    /// Draw `historical` followed by `overlay` into `slot`, destroying
    /// whatever was there first
    pub fn render(
        &mut self,
        slot: &ChartSlot,
        historical: &TimeSeries,
        overlay: &TimeSeries,
        style: &ChartStyle,
    ) -> ChartHandle {
        self.release(slot);

        let spec = ChartSpec::build(historical, overlay, style);
        let id = self.backend.create(slot, &spec);
        let handle = ChartHandle {
            slot: slot.clone(),
            id,
        };
        debug!(slot = %slot, renderer = id.0, "chart rendered");

        self.bound.insert(slot.clone(), handle.clone());
        handle
    }

    /// Destroy the renderer in `slot`. Returns whether there was one.
    pub fn release(&mut self, slot: &ChartSlot) -> bool {
        match self.bound.remove(slot) {
            Some(handle) => {
                self.backend.destroy(handle.id);
                debug!(slot = %slot, renderer = handle.id.0, "chart released");
                true
            }
            None => false,
        }
    }

    pub fn handle(&self, slot: &ChartSlot) -> Option<&ChartHandle> {
        self.bound.get(slot)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend> Drop for ChartPresenter<B> {
    fn drop(&mut self) {
        for (_, handle) in self.bound.drain() {
            self.backend.destroy(handle.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn series() -> (TimeSeries, TimeSeries) {
        (
            TimeSeries::from_pairs(vec![(2023, 990.0), (2024, 1000.0)]).unwrap(),
            TimeSeries::from_pairs(vec![(2025, 1010.0)]).unwrap(),
        )
    }

    #[test]
    fn test_spec_pads_gaps() {
        let (historical, overlay) = series();
        let spec = ChartSpec::build(&historical, &overlay, &ChartStyle::official());

        assert_eq!(spec.labels, vec![2023, 2024, 2025]);
        assert_eq!(spec.datasets.len(), 2);
        assert_eq!(spec.datasets[0].values, vec![Some(990.0), Some(1000.0), None]);
        assert_eq!(spec.datasets[1].values, vec![None, None, Some(1010.0)]);
        assert_eq!(spec.datasets[1].style.label, "Official forecast (moderate)");
    }

    #[test]
    fn test_datasets_match_label_count() {
        let historical = TimeSeries::from_pairs(vec![(2023, 990.0), (2024, 1000.0)]).unwrap();
        let overlay = TimeSeries::from_index_aligned(2025, &[1010.0, 1020.0, 1030.0]).unwrap();
        let spec = ChartSpec::build(&historical, &overlay, &ChartStyle::official());

        assert_eq!(spec.labels.len(), 5);
        for dataset in &spec.datasets {
            assert_eq!(dataset.values.len(), spec.labels.len());
        }
        assert_eq!(spec.tooltip(0, 4), None);
        assert_eq!(
            spec.tooltip(1, 4).as_deref(),
            Some("Year 2027: Official forecast (moderate): 1030.00 TWh (forecast)")
        );
    }

    #[test]
    fn test_empty_overlay_draws_history_only() {
        let (historical, _) = series();
        let spec = ChartSpec::build(&historical, &TimeSeries::empty(), &ChartStyle::official());
        assert_eq!(spec.datasets.len(), 1);
        assert_eq!(spec.labels, vec![2023, 2024]);
    }

    #[test]
    fn test_tooltip() {
        let (historical, overlay) = series();
        let spec = ChartSpec::build(
            &historical,
            &overlay,
            &ChartStyle::simulation(Scenario::Pessimistic),
        );

        assert_eq!(
            spec.tooltip(0, 1).as_deref(),
            Some("Year 2024: Historical data: 1000.00 TWh (actual)")
        );
        assert_eq!(
            spec.tooltip(1, 2).as_deref(),
            Some("Year 2025: Simulation (pessimistic): 1010.00 TWh (simulation)")
        );
        assert_eq!(spec.tooltip(1, 0), None);
    }

    #[test]
    fn test_scenario_colors() {
        assert_eq!(
            ChartStyle::simulation(Scenario::Optimistic).overlay.border_color,
            "#2e7d32"
        );
        assert_eq!(
            ChartStyle::simulation(Scenario::Moderate).overlay.border_color,
            "#ffc107"
        );
        assert_eq!(ChartStyle::official().overlay.dash, Some([5, 5]));
    }

    #[test]
    fn test_release_and_drop() {
        let backend = InMemoryBackend::new();
        let (historical, overlay) = series();
        let mut presenter = ChartPresenter::new(backend.clone());

        presenter.render(&ChartSlot::PREVIEW, &historical, &overlay, &ChartStyle::official());
        presenter.render(
            &ChartSlot::SIMULATION,
            &historical,
            &overlay,
            &ChartStyle::simulation(Scenario::Optimistic),
        );
        assert_eq!(backend.live_count(), 2);

        assert!(presenter.release(&ChartSlot::SIMULATION));
        assert!(!presenter.release(&ChartSlot::SIMULATION));
        assert_eq!(backend.live_in(&ChartSlot::SIMULATION), vec![]);

        drop(presenter);
        assert_eq!(backend.live_count(), 0);
        assert_eq!(backend.destroyed_count(), 2);
    }
}
