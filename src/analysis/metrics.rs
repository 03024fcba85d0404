//! Derived macro metrics.
//!
//! Every function here is total: insufficient history, a missing/non-finite
//! observation or a zero denominator produce `None`, never a panic or an
//! infinite value. Inputs are latest-first, evenly spaced observation lists.

use serde::{Deserialize, Serialize};
use crate::models::RawObservation;

/// Default lag for monthly YoY (12 observations back)
pub const MONTHLY_YOY_LAG: usize = 12;

fn value_at(obs_desc: &[RawObservation], idx: usize) -> Option<f64> {
    obs_desc.get(idx).and_then(|o| o.finite_value())
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// Percent change of the latest level versus the observation `lag` periods earlier.
pub fn yoy_from_level(obs_desc: &[RawObservation], lag: usize) -> Option<f64> {
    if obs_desc.len() < lag + 1 {
        return None;
    }
    let latest = value_at(obs_desc, 0)?;
    let base = value_at(obs_desc, lag)?;
    if base == 0.0 {
        return None;
    }
    finite(((latest / base) - 1.0) * 100.0)
}

/// Single-quarter growth compounded four times: ((latest/previous)^4 - 1) * 100.
/// Assumes a quarterly series; other cadences must be resampled by the caller.
pub fn qoq_annualized(obs_desc: &[RawObservation]) -> Option<f64> {
    let latest = value_at(obs_desc, 0)?;
    let previous = value_at(obs_desc, 1)?;
    if previous == 0.0 {
        return None;
    }
    finite(((latest / previous).powi(4) - 1.0) * 100.0)
}

pub fn trend_delta(latest: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (latest, previous) {
        (Some(l), Some(p)) => finite(l - p),
        _ => None,
    }
}

/// 10Y minus 2Y, both already the latest print.
pub fn yield_curve_spread(ten_year: Option<f64>, two_year: Option<f64>) -> Option<f64> {
    trend_delta(ten_year, two_year)
}

/// Percent change from `prev` to `curr`. `None` on a missing value or zero base.
pub fn pct_change(prev: Option<f64>, curr: Option<f64>) -> Option<f64> {
    let (p, c) = (prev?, curr?);
    if p == 0.0 {
        return None;
    }
    finite(((c - p) / p) * 100.0)
}

/// Raw series feeding one regime read. Each list is latest-first; a series
/// that failed to fetch is simply empty.
#[derive(Debug, Clone, Default)]
pub struct RegimeInputs {
    pub price_index: Vec<RawObservation>,
    pub real_output: Vec<RawObservation>,
    pub unemployment: Vec<RawObservation>,
    pub long_yield: Vec<RawObservation>,
    pub short_yield: Vec<RawObservation>,
}

/// Point-in-time derived metrics. `None` means "signal unavailable".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    #[serde(rename = "inflationYoY")]
    pub inflation_yoy: Option<f64>,
    #[serde(rename = "inflationYoYDelta")]
    pub inflation_yoy_delta: Option<f64>,
    #[serde(rename = "growthQoQAnnualized")]
    pub growth_qoq_annualized: Option<f64>,
    pub unemployment_rate: Option<f64>,
    pub unemployment_delta: Option<f64>,
    pub yield_curve_spread: Option<f64>,
}

impl DerivedMetrics {
    pub fn from_inputs(inputs: &RegimeInputs) -> Self {
        let cpi = &inputs.price_index;
        let inflation_yoy = yoy_from_level(cpi, MONTHLY_YOY_LAG);
        // Previous period's YoY: same computation shifted one month back
        let inflation_yoy_prev = cpi.get(1..).and_then(|rest| yoy_from_level(rest, MONTHLY_YOY_LAG));

        let unemployment_rate = value_at(&inputs.unemployment, 0);
        let unemployment_prev = value_at(&inputs.unemployment, 1);

        DerivedMetrics {
            inflation_yoy,
            inflation_yoy_delta: trend_delta(inflation_yoy, inflation_yoy_prev),
            growth_qoq_annualized: qoq_annualized(&inputs.real_output),
            unemployment_rate,
            unemployment_delta: trend_delta(unemployment_rate, unemployment_prev),
            yield_curve_spread: yield_curve_spread(
                value_at(&inputs.long_yield, 0),
                value_at(&inputs.short_yield, 0),
            ),
        }
    }
}
