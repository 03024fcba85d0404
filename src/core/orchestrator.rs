use chrono::Utc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::economy::{self, CentralBankSnapshot, EconomyReadings, EconomySnapshot, LatestReading};
use crate::analysis::history::{self, HistoryInputs, RegimeHistory};
use crate::analysis::insight::SignalSources;
use crate::analysis::metrics::{DerivedMetrics, RegimeInputs};
use crate::analysis::report::RegimeReport;
use crate::core::cache::Cache;
use crate::fetcher::{DataSource, SeriesRequest};
use crate::indicators::registry::Registry;
use crate::models::{Economy, Frequency, RawObservation};

const ECONOMY_SNAPSHOT_KEY: &str = "indicators";

/// A named series that could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFailure {
    pub series_id: String,
    pub reason: String,
}

fn join_failures(failures: &[SeriesFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} failed: {}", f.series_id, f.reason))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Unsupported economy: {0}")]
    UnsupportedEconomy(String),

    #[error("{}", join_failures(.0))]
    SeriesUnavailable(Vec<SeriesFailure>),
}

/// Resolve an economy code, defaulting to US when absent or blank.
pub fn resolve_economy(code: Option<&str>) -> Result<Economy, ServiceError> {
    match code.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(Economy::default()),
        Some(c) => Economy::parse(c).ok_or_else(|| ServiceError::UnsupportedEconomy(c.to_string())),
    }
}

fn request_for(slug: &str, limit: usize) -> SeriesRequest {
    Registry::get_metadata(slug)
        .map(|m| m.request(limit))
        .unwrap_or_else(|| SeriesRequest::new(slug, limit))
}

fn signal_sources() -> SignalSources {
    SignalSources {
        inflation: Registry::series_id("cpi"),
        growth: Registry::series_id("real_gdp"),
        unemployment: Registry::series_id("unrate"),
        long_yield: Registry::series_id("us_10y"),
        short_yield: Registry::series_id("us_2y"),
    }
}

type SeriesOutcome = Result<Vec<RawObservation>, SeriesFailure>;

async fn fetch_series(source: &dyn DataSource, request: SeriesRequest) -> SeriesOutcome {
    match source.fetch_observations(&request).await {
        Ok(obs) => {
            debug!(series = %request.series_id, points = obs.len(), source = source.name(), "Fetched series");
            Ok(obs)
        }
        Err(e) => {
            warn!(series = %request.series_id, error = %e, "Series fetch failed");
            Err(SeriesFailure {
                series_id: request.series_id,
                reason: e.to_string(),
            })
        }
    }
}

/// Substitute an empty series for each failure. Errors only when every series failed.
fn settle_all<const N: usize>(outcomes: [SeriesOutcome; N]) -> Result<[Vec<RawObservation>; N], ServiceError> {
    let mut failures = Vec::new();
    let series = outcomes.map(|outcome| match outcome {
        Ok(obs) => obs,
        Err(failure) => {
            failures.push(failure);
            Vec::new()
        }
    });

    if N > 0 && failures.len() == N {
        return Err(ServiceError::SeriesUnavailable(failures));
    }
    if !failures.is_empty() {
        info!(failed = failures.len(), total = N, "Continuing with partial data");
    }
    Ok(series)
}

/// Fan out the five regime inputs concurrently, fan in once all have settled.
pub async fn fetch_regime_inputs(source: &dyn DataSource) -> Result<RegimeInputs, ServiceError> {
    let (cpi, gdp, unrate, y10, y2) = tokio::join!(
        fetch_series(source, request_for("cpi", 24)),
        fetch_series(source, request_for("real_gdp", 8)),
        fetch_series(source, request_for("unrate", 6)),
        fetch_series(source, request_for("us_10y", 10)),
        fetch_series(source, request_for("us_2y", 10)),
    );

    let [price_index, real_output, unemployment, long_yield, short_yield] =
        settle_all([cpi, gdp, unrate, y10, y2])?;

    Ok(RegimeInputs {
        price_index,
        real_output,
        unemployment,
        long_yield,
        short_yield,
    })
}

/// Current regime read, cached per economy for `ttl`.
pub async fn build_regime_report(
    source: &dyn DataSource,
    cache: &dyn Cache<RegimeReport>,
    economy: Economy,
    ttl: Duration,
) -> Result<RegimeReport, ServiceError> {
    let cache_key = format!("{}-regime", economy.code().to_lowercase());
    if let Some(hit) = cache.get(&cache_key) {
        debug!(key = %cache_key, "Regime cache hit");
        return Ok(hit);
    }

    let inputs = fetch_regime_inputs(source).await?;
    let metrics = DerivedMetrics::from_inputs(&inputs);
    let report = RegimeReport::build(economy, &metrics, &signal_sources(), Utc::now());

    info!(
        economy = %economy,
        label = %report.current.label,
        confidence = report.current.confidence_pct,
        "Regime classified"
    );

    cache.set(&cache_key, report.clone(), ttl);
    Ok(report)
}

/// Monthly regime history over the newest `months` months (already clamped by the caller).
pub async fn build_regime_history(
    source: &dyn DataSource,
    economy: Economy,
    months: u32,
) -> Result<RegimeHistory, ServiceError> {
    let m = months as usize;

    let (cpi, unrate, spread, gdp) = tokio::join!(
        fetch_series(source, request_for("cpi", m + 24).with_frequency(Frequency::Monthly)),
        fetch_series(source, request_for("unrate", m + 2).with_frequency(Frequency::Monthly)),
        fetch_series(source, request_for("yield_curve_10y_2y", m).with_frequency(Frequency::Monthly)),
        fetch_series(source, request_for("real_gdp", 12).with_frequency(Frequency::Quarterly)),
    );

    let [price_index, unemployment, curve_spread, real_output] = settle_all([cpi, unrate, spread, gdp])?;

    let inputs = HistoryInputs {
        price_index,
        unemployment,
        curve_spread,
        real_output,
    };
    let history = history::build_history(economy, &inputs, months, Utc::now());
    info!(economy = %economy, months, points = history.series.len(), "Regime history built");
    Ok(history)
}

/// Headline indicators. PMI is optional; every other series must resolve.
pub async fn build_economy_snapshot(
    source: &dyn DataSource,
    cache: &dyn Cache<EconomySnapshot>,
    ttl: Duration,
) -> Result<EconomySnapshot, ServiceError> {
    if let Some(hit) = cache.get(ECONOMY_SNAPSHOT_KEY) {
        debug!("Indicators cache hit");
        return Ok(hit);
    }

    let fed_id = Registry::series_id("fed_funds");
    let un_id = Registry::series_id("unrate");
    let pmi_id = Registry::series_id("pmi");
    let gdp_id = Registry::series_id("gdp_growth");
    let vix_id = Registry::series_id("vix");

    let (fed, unrate, pmi, gdp, vix, cpi) = tokio::join!(
        fetch_series(source, request_for("fed_funds", 2)),
        fetch_series(source, request_for("unrate", 2)),
        fetch_series(source, request_for("pmi", 2)),
        fetch_series(source, request_for("gdp_growth", 2)),
        fetch_series(source, request_for("vix", 2)),
        fetch_series(source, request_for("cpi", 14)),
    );

    let mut failures = Vec::new();
    let mut latest = |series_id: &str, outcome: SeriesOutcome| -> Option<LatestReading> {
        let resolved = outcome
            .map_err(|f| f.reason)
            .and_then(|obs| LatestReading::from_observations(series_id, &obs).map_err(|e| e.to_string()));
        match resolved {
            Ok(reading) => Some(reading),
            Err(reason) => {
                failures.push(SeriesFailure { series_id: series_id.to_string(), reason });
                None
            }
        }
    };

    let fed_funds = latest(&fed_id, fed);
    let unemployment = latest(&un_id, unrate);
    let gdp_growth = latest(&gdp_id, gdp);
    let vix = latest(&vix_id, vix);

    let cpi_window = match cpi {
        Ok(obs) => Some(obs),
        Err(failure) => {
            failures.push(failure);
            None
        }
    };

    let pmi = match pmi
        .map_err(|f| f.reason)
        .and_then(|obs| LatestReading::from_observations(&pmi_id, &obs).map_err(|e| e.to_string()))
    {
        Ok(reading) => Some(reading),
        Err(reason) => {
            warn!(series = %pmi_id, %reason, "Optional series unavailable");
            None
        }
    };

    let (Some(fed_funds), Some(unemployment), Some(gdp_growth), Some(vix), Some(cpi_window)) =
        (fed_funds, unemployment, gdp_growth, vix, cpi_window)
    else {
        return Err(ServiceError::SeriesUnavailable(failures));
    };

    let readings = EconomyReadings {
        fed_funds,
        unemployment,
        pmi,
        gdp_growth,
        vix,
        cpi_window,
    };
    let snapshot = economy::build_snapshot(&readings, Utc::now());

    cache.set(ECONOMY_SNAPSHOT_KEY, snapshot.clone(), ttl);
    Ok(snapshot)
}

/// Latest policy rate with its stance.
pub async fn build_central_bank(source: &dyn DataSource) -> Result<CentralBankSnapshot, ServiceError> {
    let series_id = Registry::series_id("fed_funds");
    let reading = fetch_series(source, request_for("fed_funds", 1))
        .await
        .and_then(|obs| {
            LatestReading::from_observations(&series_id, &obs).map_err(|e| SeriesFailure {
                series_id: series_id.clone(),
                reason: e.to_string(),
            })
        })
        .map_err(|failure| ServiceError::SeriesUnavailable(vec![failure]))?;

    let snapshot = CentralBankSnapshot::from_reading(&reading, Utc::now());
    info!(rate = snapshot.policy_rate, stance = ?snapshot.stance, "Central bank stance read");
    Ok(snapshot)
}
