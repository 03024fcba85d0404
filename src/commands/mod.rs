use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::analysis::economy::EconomySnapshot;
use crate::analysis::report::RegimeReport;
use crate::config::Settings;
use crate::core::cache::{Cache, MemoryCache};
use crate::core::orchestrator::ServiceError;
use crate::fetcher::DataSource;

pub mod economy;
pub mod regime;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub regime_cache: Arc<dyn Cache<RegimeReport>>,
    pub indicators_cache: Arc<dyn Cache<EconomySnapshot>>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State backed by in-process caches.
    pub fn new(source: Arc<dyn DataSource>, settings: Settings) -> Self {
        AppState {
            source,
            regime_cache: Arc::new(MemoryCache::new()),
            indicators_cache: Arc::new(MemoryCache::new()),
            settings: Arc::new(settings),
        }
    }
}

/// Error body returned by every endpoint: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::UnsupportedEconomy(_) => ApiError::bad_request("Only US supported for now"),
            other => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "Request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}
