use crate::models::{DataPoint, RawObservation};
use chrono::{Months, NaiveDate};
use std::collections::BTreeMap;

/// Convert a latest-first observation list into clean oldest-first points.
/// Observations with a missing value or an unparseable date are dropped.
pub fn ascending_points(obs_desc: &[RawObservation]) -> Vec<DataPoint> {
    obs_desc
        .iter()
        .rev()
        .filter_map(|o| {
            let value = o.finite_value()?;
            let date = o.naive_date()?;
            Some(DataPoint { date, value })
        })
        .collect()
}

/// Year-over-year percent change for every point whose exact date one year
/// earlier is present in the series. Points without a base (or a zero base) are skipped.
pub fn yoy_by_date(points_asc: &[DataPoint]) -> Vec<DataPoint> {
    let by_date: BTreeMap<NaiveDate, f64> = points_asc.iter().map(|p| (p.date, p.value)).collect();

    points_asc
        .iter()
        .filter_map(|p| {
            let base_date = p.date.checked_sub_months(Months::new(12))?;
            let base = *by_date.get(&base_date)?;
            if base == 0.0 {
                return None;
            }
            Some(DataPoint {
                date: p.date,
                value: ((p.value / base) - 1.0) * 100.0,
            })
        })
        .collect()
}

/// Annualized growth for each consecutive pair: ((cur/prev)^4 - 1) * 100.
/// Result is dated at the later observation.
pub fn qoq_annualized_series(points_asc: &[DataPoint]) -> Vec<DataPoint> {
    points_asc
        .windows(2)
        .filter_map(|w| {
            let (prev, cur) = (w[0], w[1]);
            if prev.value == 0.0 {
                return None;
            }
            let value = ((cur.value / prev.value).powi(4) - 1.0) * 100.0;
            value.is_finite().then_some(DataPoint { date: cur.date, value })
        })
        .collect()
}

/// Forward-fill lookup: value of the latest point dated on or before `date`.
/// Lower-frequency data (quarterly GDP) is carried into higher-frequency months this way.
pub fn latest_on_or_before(points_asc: &[DataPoint], date: NaiveDate) -> Option<f64> {
    let idx = points_asc.partition_point(|p| p.date <= date);
    if idx == 0 {
        None
    } else {
        Some(points_asc[idx - 1].value)
    }
}

/// Keep the newest `n` points of an oldest-first series.
pub fn take_last(points_asc: &[DataPoint], n: usize) -> Vec<DataPoint> {
    let start = points_asc.len().saturating_sub(n);
    points_asc[start..].to_vec()
}
