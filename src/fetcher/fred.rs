use async_trait::async_trait;
use crate::models::RawObservation;
use super::{DataSource, FetchError, SeriesRequest};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

const FRED_BASE: &str = "https://api.stlouisfed.org/fred/series/observations";

pub struct FredFetcher {
    api_key: String,
    client: Client,
}

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

impl FredFetcher {
    pub fn new(api_key: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("MacroDashboard/1.0"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_key, client }
    }

    fn query_params(&self, request: &SeriesRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("series_id", request.series_id.clone()),
            ("api_key", self.api_key.trim().to_string()),
            ("file_type", "json".to_string()),
            ("sort_order", "desc".to_string()),
            ("limit", request.limit.to_string()),
        ];
        if let Some(freq) = request.frequency {
            params.push(("frequency", freq.fred_code().to_string()));
        }
        params
    }
}

#[async_trait]
impl DataSource for FredFetcher {
    fn name(&self) -> &str {
        "fred"
    }

    async fn fetch_observations(&self, request: &SeriesRequest) -> Result<Vec<RawObservation>, FetchError> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(FetchError::MissingApiKey);
        }

        if key.len() != 32 {
            warn!(key_len = key.len(), "FRED API key is not 32 characters, request will likely fail");
        }

        debug!(series = %request.series_id, limit = request.limit, "Fetching FRED observations");

        let resp = self
            .client
            .get(FRED_BASE)
            .query(&self.query_params(request))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                series_id: request.series_id.clone(),
                status,
                body,
            });
        }

        let json: Value = resp.json().await?;
        Self::parse_observations(&json)
    }
}

impl FredFetcher {
    /// Parse `{"observations": [{"date": .., "value": ..}]}` preserving order.
    /// Missing values stay in the sequence as `None` so index offsets remain period offsets.
    pub fn parse_observations(json: &Value) -> Result<Vec<RawObservation>, FetchError> {
        let observations = json["observations"]
            .as_array()
            .ok_or_else(|| FetchError::InvalidResponse("No observations found in FRED response".to_string()))?;

        let mut points = Vec::with_capacity(observations.len());

        for obs in observations {
            let Some(date) = obs["date"].as_str() else {
                continue;
            };

            // FRED sends values as strings; tolerate bare numbers too
            let value = match &obs["value"] {
                Value::String(s) => RawObservation::parse_value(s),
                Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
                _ => None,
            };

            points.push(RawObservation::new(date, value));
        }

        Ok(points)
    }
}
