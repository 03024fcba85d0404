use anyhow::Context;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod analysis;
pub mod commands;
pub mod config;
pub mod core;
pub mod fetcher;
pub mod indicators;
pub mod models;

use crate::commands::AppState;
use crate::config::Settings;
use crate::fetcher::fred::FredFetcher;

const DEFAULT_LOG_FILTER: &str = "macro_dashboard_lib=info,macro_dashboard=info,tower_http=info";

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .try_init();
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return cors.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors_origins);

    Router::new()
        .route("/health", get(commands::health))
        .route("/api/economy/regime", get(commands::regime::get_regime))
        .route("/api/economy/regime/history", get(commands::regime::get_regime_history))
        .route("/api/economy/indicators", get(commands::economy::get_indicators))
        .route("/api/economy/central-bank", get(commands::economy::get_central_bank))
        .route("/api/economy/series", get(commands::economy::list_series))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    init_tracing();

    if settings.fred_api_key.is_empty() {
        tracing::warn!("FRED_API_KEY is not set; data endpoints will fail until it is configured");
    } else {
        tracing::info!(key_len = settings.fred_api_key.len(), "Loaded FRED API key");
    }

    let addr = settings.bind_addr();
    let source = Arc::new(FredFetcher::new(settings.fred_api_key.clone()));
    let app = router(AppState::new(source, settings));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("macro-dashboard v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
