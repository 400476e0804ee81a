#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use energy_series::TimeSeries;
use forecast_client::{
    ClientError, ForecastClient, ModelMetrics, OfficialPrediction, RefreshReceipt, Scenario,
    SimulationRequest,
};
use forecast_dashboard::{DashboardConfig, DashboardSession, InMemoryBackend};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Backend stand-in with a 2020-2024 history ending at 1000 TWh, an official
/// prediction for 2025-2029 and a five year horizon
pub struct MockForecastClient {
    historical: Mutex<TimeSeries>,
    official: Mutex<OfficialPrediction>,
    simulations: HashMap<Scenario, Vec<f64>>,
    delays: Mutex<HashMap<Scenario, Duration>>,
    failing_scenarios: Mutex<Vec<Scenario>>,
    simulated_years_cap: Mutex<Option<usize>>,
    fail_loads: AtomicBool,
    pub simulate_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub requests: Mutex<Vec<SimulationRequest>>,
}

impl MockForecastClient {
    pub fn new() -> Self {
        let historical = TimeSeries::from_pairs(vec![
            (2020, 900.0),
            (2021, 930.0),
            (2022, 955.0),
            (2023, 980.0),
            (2024, 1000.0),
        ])
        .unwrap();

        let official = OfficialPrediction {
            prediction: official_prediction(),
            max_horizon_years: 5,
            metrics: ModelMetrics::new(Some(96.5), 3.5, "(1,1,1)", Some("2025-02-01".to_string())),
        };

        let simulations = [
            (Scenario::Optimistic, vec![1030.0, 1060.0, 1090.0, 1120.0, 1150.0]),
            (Scenario::Moderate, vec![1020.0, 1040.0, 1060.0, 1080.0, 1100.0]),
            (Scenario::Pessimistic, vec![1005.0, 1010.0, 1015.0, 1020.0, 1025.0]),
        ]
        .into_iter()
        .collect();

        Self {
            historical: Mutex::new(historical),
            official: Mutex::new(official),
            simulations,
            delays: Mutex::new(HashMap::new()),
            failing_scenarios: Mutex::new(Vec::new()),
            simulated_years_cap: Mutex::new(None),
            fail_loads: AtomicBool::new(false),
            simulate_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(self, scenario: Scenario, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(scenario, delay);
        self
    }

    pub fn fail_scenario(&self, scenario: Scenario) {
        self.failing_scenarios.lock().unwrap().push(scenario);
    }

    /// Answer simulations with at most `years` values, whatever was asked
    pub fn cap_simulated_years(&self, years: usize) {
        *self.simulated_years_cap.lock().unwrap() = Some(years);
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_official(&self, official: OfficialPrediction) {
        *self.official.lock().unwrap() = official;
    }

    pub fn set_historical(&self, historical: TimeSeries) {
        *self.historical.lock().unwrap() = historical;
    }

    pub fn simulated_values(&self, scenario: Scenario) -> &[f64] {
        &self.simulations[&scenario]
    }

    fn unavailable() -> ClientError {
        ClientError::Network("connection refused".to_string())
    }
}

pub fn official_prediction() -> TimeSeries {
    TimeSeries::from_index_aligned(2025, &[1010.0, 1020.0, 1030.0, 1040.0, 1050.0]).unwrap()
}

#[async_trait]
impl ForecastClient for MockForecastClient {
    async fn fetch_historical(&self, _limit: usize) -> forecast_client::Result<TimeSeries> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.historical.lock().unwrap().clone())
    }

    async fn fetch_official_prediction(&self) -> forecast_client::Result<OfficialPrediction> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.official.lock().unwrap().clone())
    }

    async fn fetch_model_metrics(&self) -> forecast_client::Result<ModelMetrics> {
        Ok(self.official.lock().unwrap().metrics.clone())
    }

    async fn simulate(&self, request: SimulationRequest) -> forecast_client::Result<TimeSeries> {
        self.simulate_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        let delay = self
            .delays
            .lock()
            .unwrap()
            .get(&request.scenario)
            .copied()
            .unwrap_or_default();
        tokio::time::sleep(delay).await;

        if self.failing_scenarios.lock().unwrap().contains(&request.scenario) {
            return Err(ClientError::Backend {
                code: 500,
                message: "model not available".to_string(),
            });
        }

        let values = &self.simulations[&request.scenario];
        let mut take = (request.years_ahead as usize).min(values.len());
        if let Some(cap) = *self.simulated_years_cap.lock().unwrap() {
            take = take.min(cap);
        }
        Ok(TimeSeries::from_index_aligned(request.start_year, &values[..take])?)
    }

    async fn trigger_refresh(&self) -> forecast_client::Result<RefreshReceipt> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok(RefreshReceipt {
            acknowledged_at: Utc::now(),
            message: Some("Data updated".to_string()),
            body: serde_json::json!({"message": "Data updated"}),
        })
    }
}

pub type MockSession = DashboardSession<MockForecastClient, InMemoryBackend>;

/// A session over `client` plus a handle on its chart backend
pub fn session(client: MockForecastClient) -> (Arc<MockForecastClient>, InMemoryBackend, MockSession) {
    let client = Arc::new(client);
    let backend = InMemoryBackend::new();
    let session = DashboardSession::new(Arc::clone(&client), backend.clone(), DashboardConfig::default());
    (client, backend, session)
}
