use async_trait::async_trait;
use thiserror::Error;
use crate::models::{Frequency, RawObservation};

pub mod fred;

/// What to pull from a provider: one series, newest `limit` observations.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub series_id: String,
    pub limit: usize,
    pub frequency: Option<Frequency>,
}

impl SeriesRequest {
    pub fn new(series_id: &str, limit: usize) -> Self {
        Self {
            series_id: series_id.to_string(),
            limit,
            frequency: None,
        }
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Missing FRED_API_KEY")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{series_id} error: {status}")]
    Api {
        series_id: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// An upstream time-series provider. Observations come back latest-first.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_observations(&self, request: &SeriesRequest) -> Result<Vec<RawObservation>, FetchError>;
}
