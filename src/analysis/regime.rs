use serde::{Deserialize, Serialize};
use std::fmt;
use crate::analysis::metrics::DerivedMetrics;

// Indicators used for regime detection
// Growth side: real GDP QoQ annualized, unemployment momentum, 10Y-2Y curve
// Inflation side: CPI YoY level, CPI YoY momentum

// Score thresholds
const GROWTH_STRONG: f64 = 1.5;
const GROWTH_CONTRACTION: f64 = 0.0;
const INFLATION_HOT: f64 = 3.0;
const INFLATION_COOL: f64 = 1.5;
const INFLATION_MOMENTUM: f64 = 0.05;
const LABOR_MOMENTUM: f64 = 0.10;
const CURVE_STEEP: f64 = 0.5;

const CONFIDENCE_BASE: i32 = 45;
const CONFIDENCE_STEP: i32 = 10;
pub const CONFIDENCE_MIN: u32 = 45;
pub const CONFIDENCE_MAX: u32 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeLabel {
    Reflation,
    Expansion,
    Stagflation,
    Deflation,
}

impl RegimeLabel {
    /// Fixed selector set, in display order
    pub const ALL: [RegimeLabel; 4] = [
        RegimeLabel::Reflation,
        RegimeLabel::Expansion,
        RegimeLabel::Stagflation,
        RegimeLabel::Deflation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegimeLabel::Reflation => "Reflation",
            RegimeLabel::Expansion => "Expansion",
            RegimeLabel::Stagflation => "Stagflation",
            RegimeLabel::Deflation => "Deflation",
        }
    }
}

impl fmt::Display for RegimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// COMPONENT SCORES
// ============================================================================

/// `None` scores 0 everywhere: a missing signal neither helps nor hurts.
pub fn score_growth(growth_qoq_annualized: Option<f64>) -> i32 {
    match growth_qoq_annualized {
        Some(g) if g >= GROWTH_STRONG => 1,
        Some(g) if g <= GROWTH_CONTRACTION => -1,
        _ => 0,
    }
}

/// Sum of a level check and a momentum check, so the range is -2..=2.
pub fn score_inflation(inflation_yoy: Option<f64>, inflation_yoy_delta: Option<f64>) -> i32 {
    let mut score = 0;
    if let Some(level) = inflation_yoy {
        if level >= INFLATION_HOT {
            score += 1;
        }
        if level <= INFLATION_COOL {
            score -= 1;
        }
    }
    if let Some(delta) = inflation_yoy_delta {
        if delta > INFLATION_MOMENTUM {
            score += 1;
        }
        if delta < -INFLATION_MOMENTUM {
            score -= 1;
        }
    }
    score
}

/// Rising unemployment is a contraction signal.
pub fn score_labor(unemployment_delta: Option<f64>) -> i32 {
    match unemployment_delta {
        Some(d) if d > LABOR_MOMENTUM => -1,
        Some(d) if d < -LABOR_MOMENTUM => 1,
        _ => 0,
    }
}

/// Inverted curve is a contraction signal.
pub fn score_curve(yield_curve_spread: Option<f64>) -> i32 {
    match yield_curve_spread {
        Some(s) if s < 0.0 => -1,
        Some(s) if s > CURVE_STEEP => 1,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeScore {
    pub growth_score: i32,
    pub inflation_score: i32,
    pub labor_score: i32,
    pub curve_score: i32,
}

impl RegimeScore {
    pub fn from_metrics(metrics: &DerivedMetrics) -> Self {
        RegimeScore {
            growth_score: score_growth(metrics.growth_qoq_annualized),
            inflation_score: score_inflation(metrics.inflation_yoy, metrics.inflation_yoy_delta),
            labor_score: score_labor(metrics.unemployment_delta),
            curve_score: score_curve(metrics.yield_curve_spread),
        }
    }

    /// Growth-side composite: output + labor + curve
    pub fn growth_total(&self) -> i32 {
        self.growth_score + self.labor_score + self.curve_score
    }

    pub fn raw_magnitude(&self) -> u32 {
        self.growth_score.unsigned_abs()
            + self.inflation_score.unsigned_abs()
            + self.labor_score.unsigned_abs()
            + self.curve_score.unsigned_abs()
    }

    pub fn direction(&self) -> Direction {
        let growth = self.growth_total();
        Direction {
            growth_up: growth >= 1,
            growth_down: growth <= -1,
            infl_up: self.inflation_score >= 1,
            infl_down: self.inflation_score <= -1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Direction {
    pub growth_up: bool,
    pub growth_down: bool,
    pub infl_up: bool,
    pub infl_down: bool,
}

// ============================================================================
// DECISION TABLE
// ============================================================================

type Rule = (fn(&Direction) -> bool, RegimeLabel);

/// Evaluated top to bottom, first match wins. Order is significant:
/// growth-up with inflation-up must resolve to Reflation before the Expansion row is seen.
const DECISION_TABLE: [Rule; 4] = [
    (|d| d.growth_up && d.infl_up, RegimeLabel::Reflation),
    (|d| d.growth_up && !d.infl_up, RegimeLabel::Expansion),
    (|d| d.growth_down && d.infl_up, RegimeLabel::Stagflation),
    (|d| d.growth_down && d.infl_down, RegimeLabel::Deflation),
];

fn fallback_label(direction: &Direction) -> RegimeLabel {
    if direction.growth_up {
        RegimeLabel::Expansion
    } else {
        RegimeLabel::Reflation
    }
}

pub fn label_for(direction: &Direction) -> RegimeLabel {
    DECISION_TABLE
        .iter()
        .find(|(predicate, _)| predicate(direction))
        .map(|(_, label)| *label)
        .unwrap_or_else(|| fallback_label(direction))
}

/// 45 + 10 per unit of signal magnitude, bounded to [45, 85].
pub fn confidence_pct(raw_magnitude: u32) -> u32 {
    let raw = CONFIDENCE_BASE + raw_magnitude as i32 * CONFIDENCE_STEP;
    raw.clamp(CONFIDENCE_MIN as i32, CONFIDENCE_MAX as i32) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeResult {
    pub label: RegimeLabel,
    pub confidence_pct: u32,
    pub scores: RegimeScore,
}

/// Classify a single point in time. Used for both the current read and each month of history.
pub fn classify_at_point(metrics: &DerivedMetrics) -> RegimeResult {
    let scores = RegimeScore::from_metrics(metrics);
    RegimeResult {
        label: label_for(&scores.direction()),
        confidence_pct: confidence_pct(scores.raw_magnitude()),
        scores,
    }
}

// ============================================================================
// SNAPSHOT BREAKDOWN (display heuristic)
// ============================================================================

/// High/medium/low split derived from confidence. Each bucket is clamped
/// independently, so the three need not sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBreakdown {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub takeaway: String,
}

impl SnapshotBreakdown {
    pub fn from_result(result: &RegimeResult) -> Self {
        let high = (result.confidence_pct as f64 * 0.6).round().clamp(20.0, 70.0) as i32;
        let medium = ((100 - high) as f64 * 0.45).round().clamp(10.0, 50.0) as i32;
        let low = (100 - high - medium).clamp(5, 60);

        SnapshotBreakdown {
            high: high as u32,
            medium: medium as u32,
            low: low as u32,
            takeaway: format!(
                "Macro signals point to {} with inflation/growth mix driving the read.",
                result.label.as_str().to_lowercase()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(
        growth: Option<f64>,
        infl: Option<f64>,
        infl_delta: Option<f64>,
        un_delta: Option<f64>,
        curve: Option<f64>,
    ) -> DerivedMetrics {
        DerivedMetrics {
            inflation_yoy: infl,
            inflation_yoy_delta: infl_delta,
            growth_qoq_annualized: growth,
            unemployment_rate: None,
            unemployment_delta: un_delta,
            yield_curve_spread: curve,
        }
    }

    #[test]
    fn test_growth_thresholds() {
        assert_eq!(score_growth(None), 0);
        assert_eq!(score_growth(Some(1.5)), 1);
        assert_eq!(score_growth(Some(1.49)), 0);
        assert_eq!(score_growth(Some(0.01)), 0);
        assert_eq!(score_growth(Some(0.0)), -1);
        assert_eq!(score_growth(Some(-2.0)), -1);
    }

    #[test]
    fn test_inflation_is_level_plus_momentum() {
        assert_eq!(score_inflation(Some(3.0), Some(0.06)), 2);
        assert_eq!(score_inflation(Some(3.0), None), 1);
        assert_eq!(score_inflation(Some(2.0), Some(0.05)), 0); // momentum strictly greater
        assert_eq!(score_inflation(Some(1.5), Some(-0.051)), -2);
        assert_eq!(score_inflation(None, Some(-0.2)), -1);
        assert_eq!(score_inflation(None, None), 0);
    }

    #[test]
    fn test_labor_and_curve_thresholds() {
        assert_eq!(score_labor(Some(0.10)), 0);
        assert_eq!(score_labor(Some(0.11)), -1);
        assert_eq!(score_labor(Some(-0.11)), 1);
        assert_eq!(score_labor(None), 0);

        assert_eq!(score_curve(Some(-0.01)), -1);
        assert_eq!(score_curve(Some(0.0)), 0);
        assert_eq!(score_curve(Some(0.5)), 0);
        assert_eq!(score_curve(Some(0.51)), 1);
        assert_eq!(score_curve(None), 0);
    }

    #[test]
    fn test_scenario_a_reflation_max_confidence() {
        let m = metrics(Some(2.1), Some(3.4), Some(0.12), Some(-0.15), Some(0.8));
        let result = classify_at_point(&m);
        assert_eq!(result.scores.inflation_score, 2);
        assert_eq!(result.scores.raw_magnitude(), 5);
        assert_eq!(result.label, RegimeLabel::Reflation);
        assert_eq!(result.confidence_pct, 85);
    }

    #[test]
    fn test_scenario_b_deflation() {
        let m = metrics(Some(-0.5), Some(1.0), Some(-0.1), Some(0.20), Some(-0.3));
        let result = classify_at_point(&m);
        assert_eq!(result.scores.growth_total(), -3);
        assert_eq!(result.scores.inflation_score, -2);
        assert_eq!(result.label, RegimeLabel::Deflation);
        assert_eq!(result.confidence_pct, 85);
    }

    #[test]
    fn test_scenario_c_total_outage_falls_back_to_reflation() {
        let result = classify_at_point(&DerivedMetrics::default());
        assert_eq!(result.scores, RegimeScore::default());
        assert_eq!(result.label, RegimeLabel::Reflation);
        assert_eq!(result.confidence_pct, 45);
    }

    #[test]
    fn test_growth_up_without_inflation_is_expansion() {
        let m = metrics(Some(2.0), Some(2.0), None, None, None);
        assert_eq!(classify_at_point(&m).label, RegimeLabel::Expansion);

        // Cooling inflation does not change it
        let m = metrics(Some(2.0), Some(1.0), Some(-0.2), None, None);
        assert_eq!(classify_at_point(&m).label, RegimeLabel::Expansion);
    }

    #[test]
    fn test_growth_down_with_inflation_up_is_stagflation() {
        let m = metrics(Some(-1.0), Some(3.5), None, Some(0.3), None);
        let result = classify_at_point(&m);
        assert_eq!(result.label, RegimeLabel::Stagflation);
        assert_eq!(result.confidence_pct, 75);
    }

    #[test]
    fn test_growth_down_with_flat_inflation_falls_back() {
        let m = metrics(Some(-1.0), Some(2.0), None, None, None);
        assert_eq!(classify_at_point(&m).label, RegimeLabel::Reflation);
    }

    #[test]
    fn test_neutral_growth_falls_back_regardless_of_inflation() {
        // Growth composite 0 (offsetting signals), inflation cooling
        let m = metrics(Some(2.0), Some(1.0), None, Some(0.2), None);
        let result = classify_at_point(&m);
        assert_eq!(result.scores.growth_total(), 0);
        assert_eq!(result.label, RegimeLabel::Reflation);
        assert_eq!(result.confidence_pct, 75);
    }

    #[test]
    fn test_first_match_wins() {
        // Both the Reflation and Expansion-fallback rows would apply without ordering
        let d = Direction { growth_up: true, growth_down: false, infl_up: true, infl_down: false };
        assert_eq!(label_for(&d), RegimeLabel::Reflation);

        let d = Direction { growth_up: false, growth_down: false, infl_up: false, infl_down: true };
        assert_eq!(label_for(&d), RegimeLabel::Reflation);
    }

    #[test]
    fn test_confidence_bounds() {
        for magnitude in 0..=10 {
            let c = confidence_pct(magnitude);
            assert!((CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&c));
        }
        assert_eq!(confidence_pct(0), 45);
        assert_eq!(confidence_pct(2), 65);
        assert_eq!(confidence_pct(6), 85);
    }

    #[test]
    fn test_snapshot_breakdown() {
        let result = classify_at_point(&DerivedMetrics::default());
        let snap = SnapshotBreakdown::from_result(&result);
        // 45 * 0.6 = 27, (73 * 0.45).round() = 33, 100 - 27 - 33 = 40
        assert_eq!((snap.high, snap.medium, snap.low), (27, 33, 40));
        assert_eq!(
            snap.takeaway,
            "Macro signals point to reflation with inflation/growth mix driving the read."
        );

        let strong = classify_at_point(&metrics(Some(2.1), Some(3.4), Some(0.12), Some(-0.15), Some(0.8)));
        let snap = SnapshotBreakdown::from_result(&strong);
        // 85 * 0.6 = 51, (49 * 0.45).round() = 22, 100 - 51 - 22 = 27
        assert_eq!((snap.high, snap.medium, snap.low), (51, 22, 27));
    }

    #[test]
    fn test_label_serializes_as_name() {
        assert_eq!(serde_json::to_string(&RegimeLabel::Stagflation).unwrap(), "\"Stagflation\"");
        assert_eq!(RegimeLabel::ALL.len(), 4);
    }
}
