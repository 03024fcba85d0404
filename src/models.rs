use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single time-series point as returned by the upstream provider.
/// `value` is `None` when the provider reported a missing value (FRED uses ".").
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RawObservation {
    pub date: String, // YYYY-MM-DD
    pub value: Option<f64>,
}

impl RawObservation {
    pub fn new(date: &str, value: Option<f64>) -> Self {
        Self {
            date: date.to_string(),
            value,
        }
    }

    /// Parse a raw provider value. "." / empty / non-numeric / non-finite all map to `None`.
    pub fn parse_value(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "." {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Value only if present and finite.
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// Clean, dated point (no missing values). Series of these are kept oldest-first.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    /// FRED `frequency` aggregation parameter
    pub fn fred_code(&self) -> &'static str {
        match self {
            Frequency::Daily => "d",
            Frequency::Weekly => "w",
            Frequency::Monthly => "m",
            Frequency::Quarterly => "q",
        }
    }
}

/// Economies the dashboard can build a regime read for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Economy {
    #[default]
    #[serde(rename = "US")]
    Us,
}

impl Economy {
    /// Case-insensitive parse. Returns `None` for unsupported codes.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "US" => Some(Economy::Us),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Economy::Us => "US",
        }
    }
}

impl fmt::Display for Economy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_missing_markers() {
        assert_eq!(RawObservation::parse_value("."), None);
        assert_eq!(RawObservation::parse_value(""), None);
        assert_eq!(RawObservation::parse_value("n/a"), None);
        assert_eq!(RawObservation::parse_value("NaN"), None);
        assert_eq!(RawObservation::parse_value("inf"), None);
        assert_eq!(RawObservation::parse_value(" 3.25 "), Some(3.25));
    }

    #[test]
    fn test_economy_parse() {
        assert_eq!(Economy::parse("us"), Some(Economy::Us));
        assert_eq!(Economy::parse("US"), Some(Economy::Us));
        assert_eq!(Economy::parse("EU"), None);
        assert_eq!(Economy::Us.to_string(), "US");
        assert_eq!(Economy::default(), Economy::Us);
    }

    #[test]
    fn test_naive_date() {
        let obs = RawObservation::new("2024-03-01", Some(1.0));
        assert_eq!(obs.naive_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(RawObservation::new("03/01/2024", None).naive_date().is_none());
    }
}
