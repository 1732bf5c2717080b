//! Configuration model loaded from external sources.

use std::num::NonZeroU64;
use std::time::Duration;

use serde::Deserialize;

use crate::query::page::DEFAULT_MAX_LIMIT;

#[derive(Clone, Debug, Deserialize)]
/// Settings read from `config/*.yaml` and `APP_*` environment variables.
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Bound on pool checkout and on waiting for a locked database. Zero is
    /// rejected when the configuration is loaded.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: NonZeroU64,
}

/// Page size bounds applied when mapping query parameters into page requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    DEFAULT_MAX_LIMIT
}

fn default_query_timeout_secs() -> NonZeroU64 {
    NonZeroU64::MIN.saturating_add(29)
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl AppConfig {
    pub fn paging(&self) -> PagingConfig {
        PagingConfig {
            default_page_size: self.default_page_size.min(self.max_page_size),
            max_page_size: self.max_page_size,
        }
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs.get())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_fill_missing_settings() {
        let config: AppConfig = serde_json::from_value(json!({ "database_url": "fleet.db" }))
            .expect("valid config");

        assert_eq!(config.query_timeout(), Duration::from_secs(30));
        assert_eq!(config.paging(), PagingConfig::default());
    }

    #[test]
    fn zero_query_timeout_is_rejected() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "database_url": "fleet.db",
            "query_timeout_secs": 0,
        }));

        assert!(result.is_err());
    }

    #[test]
    fn default_page_size_is_capped_by_maximum() {
        let config: AppConfig = serde_json::from_value(json!({
            "database_url": "fleet.db",
            "default_page_size": 50,
            "max_page_size": 20,
        }))
        .expect("valid config");

        assert_eq!(config.paging().default_page_size, 20);
    }
}
