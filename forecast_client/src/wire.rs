//! JSON shapes of the backend endpoints and their decoding
//!
//! Every decoder takes the HTTP status alongside the body so that a body
//! which parses but reports failure (or does not parse at all) can be
//! surfaced as [`ClientError::Backend`] with the right code.

use energy_series::TimeSeries;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::error::{ClientError, Result};
use crate::models::{ModelMetrics, SimulationRequest};

pub const ENERGY_PATH: &str = "/api/data/energy";
pub const LATEST_PREDICTION_PATH: &str = "/api/prediction/latest";
pub const PREDICT_PATH: &str = "/api/predict";
pub const METRICS_PATH: &str = "/api/model/metrics";
pub const REFRESH_PATH: &str = "/update-data";

#[derive(Debug, Deserialize)]
struct EnergyRow {
    year: i32,
    #[serde(rename = "fossil_fuels__twh")]
    fossil_fuels_twh: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnergyResponse {
    Wrapped {
        success: bool,
        #[serde(default)]
        data: Vec<EnergyRow>,
        message: Option<String>,
    },
    Bare(Vec<EnergyRow>),
}

#[derive(Debug, Deserialize)]
struct PredictionRow {
    year: i32,
    prediction_value: f64,
}

#[derive(Debug, Deserialize)]
struct LatestPredictionResponse {
    #[serde(default)]
    predictions: Vec<PredictionRow>,
    #[serde(default)]
    years: u32,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    status: Option<String>,
    #[serde(default)]
    predictions: Vec<f64>,
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricsBody {
    accuracy: Option<f64>,
    mape: f64,
    order: String,
    training_date: Option<String>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricsResponse {
    success: bool,
    metrics: Option<MetricsBody>,
    message: Option<String>,
}

/// Best-effort error text from a failure body
pub(crate) fn failure_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn parse<T: DeserializeOwned>(code: u16, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ClientError::Backend {
        code,
        message: format!("malformed response: {}", e),
    })
}

fn backend(code: u16, message: Option<String>, fallback: &str) -> ClientError {
    ClientError::Backend {
        code,
        message: message.unwrap_or_else(|| fallback.to_string()),
    }
}

/// `GET /api/data/energy?limit=N`
pub fn decode_historical(code: u16, body: &str) -> Result<TimeSeries> {
    let rows = match parse::<EnergyResponse>(code, body)? {
        EnergyResponse::Wrapped {
            success: true,
            data,
            ..
        } => data,
        EnergyResponse::Wrapped { message, .. } => {
            return Err(backend(code, message, "energy data request failed"))
        }
        EnergyResponse::Bare(rows) => rows,
    };

    Ok(TimeSeries::from_pairs(
        rows.into_iter().map(|r| (r.year, r.fossil_fuels_twh)),
    )?)
}

/// `GET /api/prediction/latest`, returning the series and the configured
/// horizon (`years`, 0 when the backend has no active prediction)
pub fn decode_latest_prediction(code: u16, body: &str) -> Result<(TimeSeries, u32)> {
    let response: LatestPredictionResponse = parse(code, body)?;
    let prediction = TimeSeries::from_pairs(
        response
            .predictions
            .into_iter()
            .map(|r| (r.year, r.prediction_value)),
    )?;

    Ok((prediction, response.years))
}

/// `POST /api/predict`; predictions are index-aligned to the request's
/// start year
pub fn decode_simulation(
    code: u16,
    body: &str,
    request: &SimulationRequest,
) -> Result<TimeSeries> {
    let response: PredictResponse = parse(code, body)?;

    if response.status.as_deref() != Some("success") {
        return Err(backend(
            code,
            response.error.or(response.message),
            "simulation request failed",
        ));
    }

    if response.predictions.len() != request.years_ahead as usize {
        warn!(
            expected = request.years_ahead,
            received = response.predictions.len(),
            "simulation returned an unexpected number of years"
        );
    }

    Ok(TimeSeries::from_index_aligned(
        request.start_year,
        &response.predictions,
    )?)
}

/// `GET /api/model/metrics`
pub fn decode_metrics(code: u16, body: &str) -> Result<ModelMetrics> {
    let response: MetricsResponse = parse(code, body)?;

    match response {
        MetricsResponse {
            success: true,
            metrics: Some(m),
            ..
        } => {
            let metrics = ModelMetrics::new(m.accuracy, m.mape, m.order, m.training_date);
            Ok(match m.model_version {
                Some(version) => metrics.with_model_version(version),
                None => metrics,
            })
        }
        MetricsResponse { message, .. } => {
            Err(backend(code, message, "no active model metrics"))
        }
    }
}
