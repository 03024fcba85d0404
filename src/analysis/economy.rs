use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::metrics::{pct_change, trend_delta, yoy_from_level, MONTHLY_YOY_LAG};
use crate::models::RawObservation;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadingError {
    #[error("No latest value for {0}")]
    NoLatestValue(String),
}

/// Latest print of a series plus the one before it.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestReading {
    pub date: String,
    pub value: f64,
    pub prev: Option<f64>,
}

impl LatestReading {
    /// From a latest-first window. A missing latest value is an error for headline series.
    pub fn from_observations(series_id: &str, obs_desc: &[RawObservation]) -> Result<Self, ReadingError> {
        let missing = || ReadingError::NoLatestValue(series_id.to_string());
        let latest = obs_desc.first().ok_or_else(missing)?;
        let value = latest.finite_value().ok_or_else(missing)?;

        Ok(LatestReading {
            date: latest.date.clone(),
            value,
            prev: obs_desc.get(1).and_then(|o| o.finite_value()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorValue {
    pub value: Option<f64>,
    pub change: Option<f64>,
    pub as_of_date: Option<String>,
}

impl From<&LatestReading> for IndicatorValue {
    fn from(r: &LatestReading) -> Self {
        IndicatorValue {
            value: Some(r.value),
            change: pct_change(r.prev, Some(r.value)),
            as_of_date: Some(r.date.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRate {
    pub policy_rate: f64,
    pub change: Option<f64>,
    pub as_of_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineIndicators {
    pub gdp_growth: IndicatorValue,
    #[serde(rename = "inflationYoY")]
    pub inflation_yoy: IndicatorValue,
    pub unemployment: IndicatorValue,
    pub pmi: Option<IndicatorValue>,
    pub risk_sentiment: IndicatorValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EconomySnapshot {
    pub fetched_at: DateTime<Utc>,
    pub fed: PolicyRate,
    pub indicators: HeadlineIndicators,
}

const HAWKISH_RATE: f64 = 5.0;
const DOVISH_RATE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyStance {
    #[serde(rename = "Mildly Hawkish")]
    MildlyHawkish,
    Neutral,
    #[serde(rename = "Mildly Dovish")]
    MildlyDovish,
}

/// Stance read off the policy-rate level alone. Both bounds are inclusive.
pub fn policy_stance(policy_rate: f64) -> PolicyStance {
    if policy_rate <= DOVISH_RATE {
        PolicyStance::MildlyDovish
    } else if policy_rate >= HAWKISH_RATE {
        PolicyStance::MildlyHawkish
    } else {
        PolicyStance::Neutral
    }
}

/// Central-bank card: latest policy rate and its stance. `fetchedAt` is a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CentralBankSnapshot {
    pub policy_rate: f64,
    pub stance: PolicyStance,
    pub as_of_date: String,
    pub fetched_at: NaiveDate,
}

impl CentralBankSnapshot {
    pub fn from_reading(reading: &LatestReading, fetched_at: DateTime<Utc>) -> Self {
        CentralBankSnapshot {
            policy_rate: reading.value,
            stance: policy_stance(reading.value),
            as_of_date: reading.date.clone(),
            fetched_at: fetched_at.date_naive(),
        }
    }
}

/// Inflation YoY from a CPI window, with the change versus last month's YoY.
pub fn inflation_from_window(cpi_desc: &[RawObservation]) -> IndicatorValue {
    let yoy = yoy_from_level(cpi_desc, MONTHLY_YOY_LAG);
    let prev_yoy = cpi_desc.get(1..).and_then(|rest| yoy_from_level(rest, MONTHLY_YOY_LAG));

    IndicatorValue {
        value: yoy,
        change: trend_delta(yoy, prev_yoy),
        as_of_date: cpi_desc.first().map(|o| o.date.clone()),
    }
}

/// Successfully resolved headline inputs
pub struct EconomyReadings {
    pub fed_funds: LatestReading,
    pub unemployment: LatestReading,
    pub pmi: Option<LatestReading>,
    pub gdp_growth: LatestReading,
    pub vix: LatestReading,
    pub cpi_window: Vec<RawObservation>,
}

pub fn build_snapshot(readings: &EconomyReadings, fetched_at: DateTime<Utc>) -> EconomySnapshot {
    EconomySnapshot {
        fetched_at,
        fed: PolicyRate {
            policy_rate: readings.fed_funds.value,
            change: pct_change(readings.fed_funds.prev, Some(readings.fed_funds.value)),
            as_of_date: readings.fed_funds.date.clone(),
        },
        indicators: HeadlineIndicators {
            gdp_growth: IndicatorValue::from(&readings.gdp_growth),
            inflation_yoy: inflation_from_window(&readings.cpi_window),
            unemployment: IndicatorValue::from(&readings.unemployment),
            pmi: readings.pmi.as_ref().map(IndicatorValue::from),
            risk_sentiment: IndicatorValue::from(&readings.vix),
        },
    }
}
