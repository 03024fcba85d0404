use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analysis::metrics::DerivedMetrics;
use crate::analysis::regime::{classify_at_point, RegimeLabel};
use crate::core::timeseries::{ascending_points, latest_on_or_before, qoq_annualized_series, take_last, yoy_by_date};
use crate::models::{DataPoint, Economy, RawObservation};

pub const DEFAULT_MONTHS: u32 = 24;
pub const MIN_MONTHS: u32 = 6;
pub const MAX_MONTHS: u32 = 120;

/// Window in months from a raw query value. Missing, blank, non-numeric or
/// zero means the default; anything else is clamped to [6, 120] and truncated.
pub fn clamp_months(requested: Option<&str>) -> u32 {
    let parsed = requested
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|m| !m.is_nan() && *m != 0.0);
    match parsed {
        Some(m) => m.clamp(MIN_MONTHS as f64, MAX_MONTHS as f64) as u32,
        None => DEFAULT_MONTHS,
    }
}

/// Raw inputs for the monthly history (all latest-first).
#[derive(Debug, Clone, Default)]
pub struct HistoryInputs {
    pub price_index: Vec<RawObservation>,
    pub unemployment: Vec<RawObservation>,
    pub curve_spread: Vec<RawObservation>,
    pub real_output: Vec<RawObservation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub date: NaiveDate,
    #[serde(rename = "inflationYoY")]
    pub inflation_yoy: Option<f64>,
    pub unemployment: Option<f64>,
    #[serde(rename = "curve10_2")]
    pub curve_10_2: Option<f64>,
    #[serde(rename = "growthQoQAnn")]
    pub growth_qoq_ann: Option<f64>,
    pub regime: RegimeLabel,
    pub confidence_pct: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMeta {
    pub economy: Economy,
    pub months: u32,
    pub fetched_at: DateTime<Utc>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegimeHistory {
    pub meta: HistoryMeta,
    pub series: Vec<HistoryPoint>,
}

fn by_date(points: &[DataPoint]) -> HashMap<NaiveDate, f64> {
    points.iter().map(|p| (p.date, p.value)).collect()
}

/// One classified point per month of CPI YoY (newest `months` of them).
/// Inflation is scored on level only here: the monthly series carries no momentum term.
pub fn build_history_series(inputs: &HistoryInputs, months: u32) -> Vec<HistoryPoint> {
    let m = months as usize;

    let cpi_yoy = take_last(&yoy_by_date(&ascending_points(&inputs.price_index)), m);
    let unemployment = take_last(&ascending_points(&inputs.unemployment), m);
    let spread = take_last(&ascending_points(&inputs.curve_spread), m);
    let gdp_growth = qoq_annualized_series(&ascending_points(&inputs.real_output));

    let un_map = by_date(&unemployment);
    let spread_map = by_date(&spread);

    // Month-over-month change within the unemployment window; first entry has no predecessor
    let un_delta_for = |date: NaiveDate| -> Option<f64> {
        let idx = unemployment.iter().position(|p| p.date == date)?;
        if idx == 0 {
            return None;
        }
        Some(unemployment[idx].value - unemployment[idx - 1].value)
    };

    cpi_yoy
        .iter()
        .map(|point| {
            let metrics = DerivedMetrics {
                inflation_yoy: Some(point.value),
                inflation_yoy_delta: None,
                growth_qoq_annualized: latest_on_or_before(&gdp_growth, point.date),
                unemployment_rate: un_map.get(&point.date).copied(),
                unemployment_delta: un_delta_for(point.date),
                yield_curve_spread: spread_map.get(&point.date).copied(),
            };
            let result = classify_at_point(&metrics);

            HistoryPoint {
                date: point.date,
                inflation_yoy: metrics.inflation_yoy,
                unemployment: metrics.unemployment_rate,
                curve_10_2: metrics.yield_curve_spread,
                growth_qoq_ann: metrics.growth_qoq_annualized,
                regime: result.label,
                confidence_pct: result.confidence_pct,
            }
        })
        .collect()
}

pub fn build_history(
    economy: Economy,
    inputs: &HistoryInputs,
    months: u32,
    fetched_at: DateTime<Utc>,
) -> RegimeHistory {
    RegimeHistory {
        meta: HistoryMeta {
            economy,
            months,
            fetched_at,
            source: "FRED".to_string(),
        },
        series: build_history_series(inputs, months),
    }
}
