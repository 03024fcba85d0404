use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::analysis::economy::{CentralBankSnapshot, EconomySnapshot};
use crate::core::orchestrator;
use crate::indicators::{Category, IndicatorMetadata, Registry};

#[derive(Debug, Default, Deserialize)]
pub struct SeriesQuery {
    pub category: Option<String>,
}

/// GET /api/economy/indicators
pub async fn get_indicators(State(state): State<AppState>) -> Result<Json<EconomySnapshot>, ApiError> {
    let snapshot = orchestrator::build_economy_snapshot(
        state.source.as_ref(),
        state.indicators_cache.as_ref(),
        state.settings.cache_ttl,
    )
    .await?;
    Ok(Json(snapshot))
}

/// GET /api/economy/central-bank
pub async fn get_central_bank(State(state): State<AppState>) -> Result<Json<CentralBankSnapshot>, ApiError> {
    let snapshot = orchestrator::build_central_bank(state.source.as_ref()).await?;
    Ok(Json(snapshot))
}

/// GET /api/economy/series, optionally narrowed with `?category=rates`
pub async fn list_series(Query(query): Query<SeriesQuery>) -> Result<Json<Vec<IndicatorMetadata>>, ApiError> {
    match query.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(Json(Registry::get_all_indicators().clone())),
        Some(name) => {
            let category = Category::parse(name)
                .ok_or_else(|| ApiError::bad_request(format!("Unknown category: {}", name)))?;
            Ok(Json(Registry::get_by_category(category)))
        }
    }
}
