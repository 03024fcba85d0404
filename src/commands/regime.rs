use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::analysis::history::{clamp_months, RegimeHistory};
use crate::analysis::report::RegimeReport;
use crate::core::orchestrator::{self, resolve_economy};

#[derive(Debug, Default, Deserialize)]
pub struct RegimeQuery {
    pub economy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub economy: Option<String>,
    /// Raw text, resolved by `clamp_months`.
    pub months: Option<String>,
}

/// GET /api/economy/regime
pub async fn get_regime(
    State(state): State<AppState>,
    Query(query): Query<RegimeQuery>,
) -> Result<Json<RegimeReport>, ApiError> {
    let economy = resolve_economy(query.economy.as_deref())?;
    let report = orchestrator::build_regime_report(
        state.source.as_ref(),
        state.regime_cache.as_ref(),
        economy,
        state.settings.cache_ttl,
    )
    .await?;
    Ok(Json(report))
}

/// GET /api/economy/regime/history
pub async fn get_regime_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<RegimeHistory>, ApiError> {
    let economy = resolve_economy(query.economy.as_deref())?;
    let months = clamp_months(query.months.as_deref());
    let history = orchestrator::build_regime_history(state.source.as_ref(), economy, months).await?;
    Ok(Json(history))
}
