use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::fetcher::SeriesRequest;
use crate::models::Frequency;

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Category {
    Inflation,
    Growth,
    Labor,
    Rates,
    Risk,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Inflation,
        Category::Growth,
        Category::Labor,
        Category::Rates,
        Category::Risk,
    ];

    /// Case-insensitive match on the variant name, e.g. "rates" -> `Rates`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| format!("{:?}", c).eq_ignore_ascii_case(name))
    }
}

/// Defines how the series value should be read/displayed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum UnitType {
    /// Raw level (e.g., CPI index 310.3)
    Index,
    /// Percentage (e.g., 4.26 -> "4.26%")
    Percent,
    /// Already in Billions from source (e.g., real GDP in chained dollars)
    Billions,
}

// ============================================================================
// METADATA STRUCT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorMetadata {
    pub slug: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub series_id: String,
    pub unit: UnitType,
    pub frequency: Frequency,
    pub source_url: String,
}

impl IndicatorMetadata {
    /// Request for the newest `limit` observations at the series' native frequency.
    pub fn request(&self, limit: usize) -> SeriesRequest {
        SeriesRequest::new(&self.series_id, limit)
    }
}

// Helper macro to reduce boilerplate
macro_rules! ind {
    ($slug:expr, $name:expr, $cat:expr, $desc:expr, $sym:expr, $unit:expr, $freq:expr) => {
        IndicatorMetadata {
            slug: $slug.to_string(),
            name: $name.to_string(),
            category: $cat,
            description: $desc.to_string(),
            series_id: $sym.to_string(),
            unit: $unit,
            frequency: $freq,
            source_url: format!("https://fred.stlouisfed.org/series/{}", $sym),
        }
    };
}

// ============================================================================
// STATIC SERIES REGISTRY (Lazy initialization, O(1) lookup)
// ============================================================================

static INDICATORS: Lazy<Vec<IndicatorMetadata>> = Lazy::new(|| {
    vec![
        // Regime inputs
        ind!("cpi", "Consumer Price Index", Category::Inflation,
             "CPI for all urban consumers, seasonally adjusted. Level series, YoY derived", "CPIAUCSL", UnitType::Index, Frequency::Monthly),
        ind!("real_gdp", "Real GDP", Category::Growth,
             "Real gross domestic product, chained dollars. QoQ annualized growth derived", "GDPC1", UnitType::Billions, Frequency::Quarterly),
        ind!("unrate", "Unemployment Rate", Category::Labor,
             "Civilian unemployment rate. Rising = labor market cooling", "UNRATE", UnitType::Percent, Frequency::Monthly),
        ind!("us_10y", "10-Year Treasury Yield", Category::Rates,
             "Benchmark long-term rate", "DGS10", UnitType::Percent, Frequency::Daily),
        ind!("us_2y", "2-Year Treasury Yield", Category::Rates,
             "Policy-sensitive short rate", "DGS2", UnitType::Percent, Frequency::Daily),
        ind!("yield_curve_10y_2y", "10Y-2Y Yield Curve", Category::Rates,
             "Spread between 10Y and 2Y Treasury. Negative = recession signal", "T10Y2Y", UnitType::Percent, Frequency::Daily),

        // Headline indicators
        ind!("fed_funds", "Effective Federal Funds Rate", Category::Rates,
             "Policy rate", "FEDFUNDS", UnitType::Percent, Frequency::Monthly),
        ind!("pmi", "ISM Manufacturing PMI", Category::Growth,
             "Manufacturing activity diffusion index. >50 = expansion", "NAPM", UnitType::Index, Frequency::Monthly),
        ind!("gdp_growth", "Real GDP Growth", Category::Growth,
             "Real GDP, percent change from preceding period, annualized", "A191RL1Q225SBEA", UnitType::Percent, Frequency::Quarterly),
        ind!("vix", "VIX", Category::Risk,
             "CBOE volatility index. Risk sentiment gauge", "VIXCLS", UnitType::Index, Frequency::Daily),
    ]
});

/// HashMap for O(1) slug -> index lookup
static INDICATOR_MAP: Lazy<HashMap<String, usize>> = Lazy::new(|| {
    INDICATORS
        .iter()
        .enumerate()
        .map(|(idx, ind)| (ind.slug.clone(), idx))
        .collect()
});

// ============================================================================
// REGISTRY STRUCT & IMPL
// ============================================================================

pub struct Registry;

impl Registry {
    pub fn get_all_indicators() -> &'static Vec<IndicatorMetadata> {
        &INDICATORS
    }

    pub fn get_by_category(category: Category) -> Vec<IndicatorMetadata> {
        INDICATORS
            .iter()
            .filter(|i| i.category == category)
            .cloned()
            .collect()
    }

    /// O(1) lookup by slug
    pub fn get_metadata(slug: &str) -> Option<IndicatorMetadata> {
        INDICATOR_MAP
            .get(slug)
            .and_then(|&idx| INDICATORS.get(idx))
            .cloned()
    }

    /// `"FRED:CPIAUCSL"` style source tag used in payload metadata
    pub fn source_tag(series_id: &str) -> String {
        format!("FRED:{}", series_id)
    }

    /// FRED series id for a slug, falling back to the slug itself for unknown ids
    pub fn series_id(slug: &str) -> String {
        Self::get_metadata(slug)
            .map(|m| m.series_id)
            .unwrap_or_else(|| slug.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_slug() {
        let cpi = Registry::get_metadata("cpi").unwrap();
        assert_eq!(cpi.series_id, "CPIAUCSL");
        assert_eq!(cpi.frequency, Frequency::Monthly);
        assert_eq!(Registry::source_tag(&cpi.series_id), "FRED:CPIAUCSL");
        assert!(Registry::get_metadata("bitcoin").is_none());
    }

    #[test]
    fn test_slugs_unique() {
        assert_eq!(INDICATOR_MAP.len(), Registry::get_all_indicators().len());
    }

    #[test]
    fn test_by_category() {
        let rates: Vec<String> = Registry::get_by_category(Category::Rates)
            .into_iter()
            .map(|m| m.series_id)
            .collect();
        assert!(rates.contains(&"DGS10".to_string()));
        assert!(rates.contains(&"DGS2".to_string()));
        assert!(!rates.contains(&"CPIAUCSL".to_string()));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("rates"), Some(Category::Rates));
        assert_eq!(Category::parse(" Inflation "), Some(Category::Inflation));
        assert_eq!(Category::parse("crypto"), None);
        let covered: usize = Category::ALL.iter().map(|c| Registry::get_by_category(*c).len()).sum();
        assert_eq!(covered, Registry::get_all_indicators().len());
    }

    #[test]
    fn test_request_uses_series_id() {
        let req = Registry::get_metadata("real_gdp").unwrap().request(8);
        assert_eq!(req.series_id, "GDPC1");
        assert_eq!(req.limit, 8);
        assert_eq!(req.frequency, None);
        assert_eq!(Registry::series_id("XYZ"), "XYZ");
    }
}
