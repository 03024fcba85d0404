use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

/// Runtime settings, read from the process environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub fred_api_key: String,
    pub cache_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
            fred_api_key: String::new(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl Settings {
    /// Load `.env` (optional) and read settings from the environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => defaults.port,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let fred_api_key = lookup("FRED_API_KEY")
            .map(|k| k.trim().to_string())
            .unwrap_or_default();

        let cache_ttl = match lookup("CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("CACHE_TTL_SECS must be a whole number of seconds, got '{}'", raw))?,
            ),
            None => defaults.cache_ttl,
        };

        Ok(Settings {
            host,
            port,
            cors_origins,
            fred_api_key,
            cache_ttl,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.cors_origins, vec!["http://localhost:3000", "http://localhost:3001"]);
        assert!(settings.fred_api_key.is_empty());
        assert_eq!(settings.cache_ttl, Duration::from_secs(300));
        assert_eq!(settings.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("PORT", "9100"),
            ("CORS_ORIGINS", " https://a.example , ,https://b.example"),
            ("FRED_API_KEY", "  abc  "),
            ("CACHE_TTL_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(settings.port, 9100);
        assert_eq!(settings.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(settings.fred_api_key, "abc");
        assert_eq!(settings.cache_ttl, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_port_is_error() {
        let result = Settings::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert!(result.is_err());
    }
}
