use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::insight::{self, SignalCard, SignalSources};
use crate::analysis::metrics::DerivedMetrics;
use crate::analysis::regime::{self, RegimeLabel, RegimeResult, SnapshotBreakdown};
use crate::indicators::Registry;
use crate::models::Economy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSources {
    pub inflation: String,
    pub gdp: String,
    pub unemployment: String,
    pub yields: Vec<String>,
}

impl From<&SignalSources> for ReportSources {
    fn from(s: &SignalSources) -> Self {
        ReportSources {
            inflation: Registry::source_tag(&s.inflation),
            gdp: Registry::source_tag(&s.growth),
            unemployment: Registry::source_tag(&s.unemployment),
            yields: vec![Registry::source_tag(&s.long_yield), Registry::source_tag(&s.short_yield)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub economy: Economy,
    pub fetched_at: DateTime<Utc>,
    pub sources: ReportSources,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRegime {
    pub label: RegimeLabel,
    pub confidence_pct: u32,
    pub options: Vec<RegimeLabel>,
}

/// Full regime payload consumed by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegimeReport {
    pub meta: ReportMeta,
    pub current: CurrentRegime,
    pub snapshot: SnapshotBreakdown,
    pub top_signals: Vec<SignalCard>,
    pub narrative: String,
    pub metrics: DerivedMetrics,
}

impl RegimeReport {
    pub fn build(
        economy: Economy,
        metrics: &DerivedMetrics,
        sources: &SignalSources,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let result: RegimeResult = regime::classify_at_point(metrics);

        RegimeReport {
            meta: ReportMeta {
                economy,
                fetched_at,
                sources: ReportSources::from(sources),
            },
            current: CurrentRegime {
                label: result.label,
                confidence_pct: result.confidence_pct,
                options: RegimeLabel::ALL.to_vec(),
            },
            snapshot: SnapshotBreakdown::from_result(&result),
            top_signals: insight::build_signal_cards(metrics, sources),
            narrative: insight::build_narrative(economy, &result, metrics),
            metrics: *metrics,
        }
    }
}
