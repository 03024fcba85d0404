use serde::{Deserialize, Serialize};
use crate::analysis::metrics::DerivedMetrics;
use crate::analysis::regime::RegimeResult;
use crate::models::Economy;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SignalLevel {
    High,
    Medium,
    Low,
}

/// One presentation-ready metric summary. Independent of the regime label.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SignalCard {
    pub id: String,
    pub title: String,
    pub value: String,
    pub delta: String,
    pub level: SignalLevel,
    pub desc: String,
}

/// Series ids quoted in card descriptions
#[derive(Debug, Clone)]
pub struct SignalSources {
    pub inflation: String,
    pub growth: String,
    pub unemployment: String,
    pub long_yield: String,
    pub short_yield: String,
}

impl Default for SignalSources {
    fn default() -> Self {
        SignalSources {
            inflation: "CPIAUCSL".to_string(),
            growth: "GDPC1".to_string(),
            unemployment: "UNRATE".to_string(),
            long_yield: "DGS10".to_string(),
            short_yield: "DGS2".to_string(),
        }
    }
}

fn pct(n: f64) -> String {
    format!("{:.2}%", n)
}

fn arrow(delta: f64) -> &'static str {
    if delta > 0.0 { "↑" } else { "↓" }
}

/// Level from the magnitude of a change. A missing change reads as Low.
pub fn level_from_delta(delta: Option<f64>) -> SignalLevel {
    match delta.map(f64::abs) {
        Some(abs) if abs >= 0.25 => SignalLevel::High,
        Some(abs) if abs >= 0.10 => SignalLevel::Medium,
        _ => SignalLevel::Low,
    }
}

/// Percentage-point change text, e.g. "↑ 0.12pp"
fn pp_delta(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!("{} {:.2}pp", arrow(d), d.abs()),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn growth_level(growth: Option<f64>) -> SignalLevel {
    match growth {
        Some(g) if g >= 2.0 => SignalLevel::High,
        Some(g) if g >= 1.0 => SignalLevel::Medium,
        _ => SignalLevel::Low,
    }
}

/// Inversion is the loudest curve signal; a steep curve is the quietest.
fn curve_level(spread: Option<f64>) -> SignalLevel {
    match spread {
        Some(s) if s < 0.0 => SignalLevel::High,
        Some(s) if s < 0.5 => SignalLevel::Medium,
        _ => SignalLevel::Low,
    }
}

/// Cards in fixed order: inflation, growth, labor, curve.
pub fn build_signal_cards(metrics: &DerivedMetrics, sources: &SignalSources) -> Vec<SignalCard> {
    vec![
        SignalCard {
            id: "inflation".to_string(),
            title: "Inflation (CPI YoY)".to_string(),
            value: metrics.inflation_yoy.map(pct).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            delta: pp_delta(metrics.inflation_yoy_delta),
            level: level_from_delta(metrics.inflation_yoy_delta),
            desc: format!("Derived from {} (FRED).", sources.inflation),
        },
        SignalCard {
            id: "growth".to_string(),
            title: "Growth (Real GDP QoQ ann.)".to_string(),
            value: metrics.growth_qoq_annualized.map(pct).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            delta: NOT_AVAILABLE.to_string(),
            level: growth_level(metrics.growth_qoq_annualized),
            desc: format!("Derived from {} (FRED).", sources.growth),
        },
        SignalCard {
            id: "labor".to_string(),
            title: "Labor (Unemployment)".to_string(),
            value: metrics.unemployment_rate.map(pct).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            delta: pp_delta(metrics.unemployment_delta),
            level: level_from_delta(metrics.unemployment_delta),
            desc: format!("From {} (FRED).", sources.unemployment),
        },
        SignalCard {
            id: "curve".to_string(),
            title: "Yield Curve (10Y–2Y)".to_string(),
            value: metrics
                .yield_curve_spread
                .map(|s| format!("{:.2}pp", s))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            delta: NOT_AVAILABLE.to_string(),
            level: curve_level(metrics.yield_curve_spread),
            desc: format!("From {} and {} (FRED).", sources.long_yield, sources.short_yield),
        },
    ]
}

/// Short paragraph: regime, inflation, growth, curve. Each sentence degrades
/// to "<signal> signal unavailable." on its own when its metric is missing.
pub fn build_narrative(economy: Economy, result: &RegimeResult, metrics: &DerivedMetrics) -> String {
    let regime = format!(
        "{} regime reads as {} with {}% confidence.",
        economy.code(),
        result.label,
        result.confidence_pct
    );

    let inflation = match metrics.inflation_yoy {
        Some(yoy) => match metrics.inflation_yoy_delta {
            Some(d) => format!(
                "Inflation is {} YoY ({} vs prior).",
                pct(yoy),
                if d > 0.0 { "rising" } else { "easing" }
            ),
            None => format!("Inflation is {} YoY.", pct(yoy)),
        },
        None => "Inflation signal unavailable.".to_string(),
    };

    let growth = match metrics.growth_qoq_annualized {
        Some(g) => format!("Growth prints {} QoQ annualized.", pct(g)),
        None => "Growth signal unavailable.".to_string(),
    };

    let curve = match metrics.yield_curve_spread {
        Some(s) => format!(
            "Curve spread is {:.2}pp ({}).",
            s,
            if s < 0.0 { "inverted" } else { "positive" }
        ),
        None => "Curve signal unavailable.".to_string(),
    };

    [regime, inflation, growth, curve].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::regime::classify_at_point;

    fn full_metrics() -> DerivedMetrics {
        DerivedMetrics {
            inflation_yoy: Some(3.4),
            inflation_yoy_delta: Some(0.12),
            growth_qoq_annualized: Some(2.1),
            unemployment_rate: Some(3.9),
            unemployment_delta: Some(-0.15),
            yield_curve_spread: Some(0.8),
        }
    }

    #[test]
    fn test_level_from_delta() {
        assert_eq!(level_from_delta(None), SignalLevel::Low);
        assert_eq!(level_from_delta(Some(0.25)), SignalLevel::High);
        assert_eq!(level_from_delta(Some(-0.3)), SignalLevel::High);
        assert_eq!(level_from_delta(Some(0.10)), SignalLevel::Medium);
        assert_eq!(level_from_delta(Some(-0.12)), SignalLevel::Medium);
        assert_eq!(level_from_delta(Some(0.05)), SignalLevel::Low);
    }

    #[test]
    fn test_signal_cards_full_data() {
        let cards = build_signal_cards(&full_metrics(), &SignalSources::default());
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["inflation", "growth", "labor", "curve"]);

        assert_eq!(cards[0].value, "3.40%");
        assert_eq!(cards[0].delta, "↑ 0.12pp");
        assert_eq!(cards[0].level, SignalLevel::Medium);
        assert_eq!(cards[0].desc, "Derived from CPIAUCSL (FRED).");

        assert_eq!(cards[1].value, "2.10%");
        assert_eq!(cards[1].delta, "N/A");
        assert_eq!(cards[1].level, SignalLevel::High);

        assert_eq!(cards[2].value, "3.90%");
        assert_eq!(cards[2].delta, "↓ 0.15pp");
        assert_eq!(cards[2].level, SignalLevel::Medium);

        assert_eq!(cards[3].value, "0.80pp");
        assert_eq!(cards[3].level, SignalLevel::Low);
        assert_eq!(cards[3].desc, "From DGS10 and DGS2 (FRED).");
    }

    #[test]
    fn test_signal_cards_missing_data() {
        let cards = build_signal_cards(&DerivedMetrics::default(), &SignalSources::default());
        for card in &cards {
            assert_eq!(card.value, "N/A");
            assert_eq!(card.delta, "N/A");
            assert_eq!(card.level, SignalLevel::Low);
        }
    }

    #[test]
    fn test_curve_level_inverted_is_high() {
        let mut m = full_metrics();
        m.yield_curve_spread = Some(-0.3);
        let cards = build_signal_cards(&m, &SignalSources::default());
        assert_eq!(cards[3].value, "-0.30pp");
        assert_eq!(cards[3].level, SignalLevel::High);
    }

    #[test]
    fn test_narrative_full() {
        let m = full_metrics();
        let result = classify_at_point(&m);
        let text = build_narrative(Economy::Us, &result, &m);
        assert_eq!(
            text,
            "US regime reads as Reflation with 85% confidence. \
             Inflation is 3.40% YoY (rising vs prior). \
             Growth prints 2.10% QoQ annualized. \
             Curve spread is 0.80pp (positive)."
        );
    }

    #[test]
    fn test_narrative_degrades_per_clause() {
        let mut m = full_metrics();
        m.growth_qoq_annualized = None;
        m.inflation_yoy_delta = None;
        m.yield_curve_spread = Some(-0.25);
        let result = classify_at_point(&m);
        let text = build_narrative(Economy::Us, &result, &m);

        assert!(text.contains("Inflation is 3.40% YoY."));
        assert!(text.contains("Growth signal unavailable."));
        assert!(text.contains("Curve spread is -0.25pp (inverted)."));
    }

    #[test]
    fn test_narrative_total_outage() {
        let m = DerivedMetrics::default();
        let result = classify_at_point(&m);
        let text = build_narrative(Economy::Us, &result, &m);
        assert_eq!(
            text,
            "US regime reads as Reflation with 45% confidence. \
             Inflation signal unavailable. Growth signal unavailable. Curve signal unavailable."
        );
    }
}
