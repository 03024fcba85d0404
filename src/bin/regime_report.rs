//! One-shot regime read against live FRED data, printed as JSON.
//!
//! Usage: regime_report [history <months>] [indicators] [central-bank]

use anyhow::{Context, Result};
use macro_dashboard_lib::analysis::history::clamp_months;
use macro_dashboard_lib::config::Settings;
use macro_dashboard_lib::core::cache::NoCache;
use macro_dashboard_lib::core::orchestrator;
use macro_dashboard_lib::fetcher::fred::FredFetcher;
use macro_dashboard_lib::models::Economy;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    macro_dashboard_lib::init_tracing();

    tracing::info!(key_len = settings.fred_api_key.len(), "Loaded API key");
    let fetcher = FredFetcher::new(settings.fred_api_key.clone());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = match args.first().map(String::as_str) {
        Some("history") => {
            let months = clamp_months(args.get(1).map(String::as_str));
            let history = orchestrator::build_regime_history(&fetcher, Economy::Us, months).await?;
            serde_json::to_string_pretty(&history)?
        }
        Some("central-bank") => {
            let snapshot = orchestrator::build_central_bank(&fetcher).await?;
            serde_json::to_string_pretty(&snapshot)?
        }
        Some("indicators") => {
            let snapshot = orchestrator::build_economy_snapshot(&fetcher, &NoCache, settings.cache_ttl).await?;
            serde_json::to_string_pretty(&snapshot)?
        }
        _ => {
            let report = orchestrator::build_regime_report(&fetcher, &NoCache, Economy::Us, settings.cache_ttl)
                .await
                .context("Regime read failed")?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{}", json);
    Ok(())
}
