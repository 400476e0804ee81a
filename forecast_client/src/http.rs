//! reqwest-backed implementation of [`ForecastClient`]

use async_trait::async_trait;
use chrono::Utc;
use energy_series::TimeSeries;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::{ModelMetrics, OfficialPrediction, RefreshReceipt, SimulationRequest};
use crate::wire::{self, failure_message};
use crate::ForecastClient;

/// Talks to the forecasting backend over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpForecastClient {
    client: Client,
    config: ClientConfig,
}

impl HttpForecastClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidRequest(
                "base url must not be empty".to_string(),
            ));
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidRequest(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and return the status code with the body text.
    ///
    /// Non-2xx statuses become [`ClientError::Backend`] here, so decoders
    /// only see bodies the backend meant as answers.
    async fn send(&self, request: RequestBuilder) -> Result<(u16, String)> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = failure_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            warn!(status = status.as_u16(), reason = %message, "backend returned an error status");
            return Err(ClientError::Backend {
                code: status.as_u16(),
                message,
            });
        }

        Ok((status.as_u16(), body))
    }

    async fn get(&self, path: &str) -> Result<(u16, String)> {
        let url = self.config.url(path);
        debug!(%url, "GET");
        self.send(self.client.get(url)).await
    }

    async fn fetch_latest_prediction(&self) -> Result<(TimeSeries, u32)> {
        let (code, body) = self.get(wire::LATEST_PREDICTION_PATH).await?;
        wire::decode_latest_prediction(code, &body)
    }
}

#[async_trait]
impl ForecastClient for HttpForecastClient {
    async fn fetch_historical(&self, limit: usize) -> Result<TimeSeries> {
        let path = format!("{}?limit={}", wire::ENERGY_PATH, limit);
        let (code, body) = self.get(&path).await?;
        let series = wire::decode_historical(code, &body)?;
        debug!(points = series.len(), "historical data received");
        Ok(series)
    }

    async fn fetch_official_prediction(&self) -> Result<OfficialPrediction> {
        let ((prediction, years), metrics) =
            futures::try_join!(self.fetch_latest_prediction(), self.fetch_model_metrics())?;

        let max_horizon_years = if years == 0 {
            warn!(
                fallback = self.config.default_horizon_years,
                "backend reported no forecast horizon, using default"
            );
            self.config.default_horizon_years
        } else {
            years
        };

        Ok(OfficialPrediction {
            prediction,
            max_horizon_years,
            metrics,
        })
    }

    async fn fetch_model_metrics(&self) -> Result<ModelMetrics> {
        let (code, body) = self.get(wire::METRICS_PATH).await?;
        wire::decode_metrics(code, &body)
    }

    async fn simulate(&self, request: SimulationRequest) -> Result<TimeSeries> {
        let url = self.config.url(wire::PREDICT_PATH);
        debug!(%url, scenario = %request.scenario, years = request.years_ahead, "POST simulation");

        let (code, body) = self
            .send(self.client.post(url).json(&request.body()))
            .await?;
        wire::decode_simulation(code, &body, &request)
    }

    async fn trigger_refresh(&self) -> Result<RefreshReceipt> {
        let url = self.config.url(wire::REFRESH_PATH);
        info!(%url, "requesting data refresh");

        let (code, body) = self
            .send(self.client.get(url).timeout(self.config.refresh_timeout()))
            .await?;
        let body: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Backend {
                code,
                message: format!("malformed response: {}", e),
            })?;

        Ok(RefreshReceipt {
            acknowledged_at: Utc::now(),
            message: body
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            body,
        })
    }
}
