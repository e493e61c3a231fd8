//! Configuration management for the ucpnz extractor
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. Everything here is resolved once at startup and
//! passed into the pipeline as an immutable value.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;
use crate::utils::parse_duration;

/// Fallback used when the configured timeout string cannot be parsed
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site being extracted
    pub site: SiteConfig,

    /// Recency filter configuration
    pub filter: FilterConfig,

    /// Article storage configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Static description of the one site this crate extracts from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site domain, e.g. `ucpnz.co.nz`
    pub domain: String,

    /// Display title
    pub title: String,

    /// Human-readable request timeout, e.g. `"30s"` or `"1m"`
    pub timeout: String,
}

/// Recency filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Articles older than this many days are skipped
    pub days: i64,
}

/// Article storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding extracted articles
    pub articles_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl SiteConfig {
    /// Request timeout as a `Duration`
    ///
    /// An unparsable timeout string is not an error: it is logged and the
    /// one-minute default is used instead.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        match parse_duration(&self.timeout) {
            Ok(timeout) => timeout,
            Err(e) => {
                tracing::warn!(
                    site = %self.title,
                    timeout = %self.timeout,
                    error = %e,
                    "timeout init error, using default"
                );
                DEFAULT_TIMEOUT
            }
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: String::from("ucpnz.co.nz"),
            title: String::from("UCPNZ"),
            timeout: String::from("1m"),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { days: 3 }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            articles_path: PathBuf::from("data/articles.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let domain = std::env::var("UCPNZ_DOMAIN").unwrap_or(defaults.site.domain);
        let title = std::env::var("UCPNZ_TITLE").unwrap_or(defaults.site.title);
        let timeout = std::env::var("UCPNZ_TIMEOUT").unwrap_or(defaults.site.timeout);

        let days = match std::env::var("UCPNZ_FILTER_DAYS") {
            Ok(v) => v
                .parse::<i64>()
                .with_context(|| format!("UCPNZ_FILTER_DAYS is not a number: {v}"))?,
            Err(_) => defaults.filter.days,
        };

        let articles_path = std::env::var("UCPNZ_ARTICLES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage.articles_path);

        let level = std::env::var("UCPNZ_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format = std::env::var("UCPNZ_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            site: SiteConfig {
                domain,
                title,
                timeout,
            },
            filter: FilterConfig { days },
            storage: StorageConfig { articles_path },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.site.domain.trim().is_empty() {
            return Err(Error::config("site.domain must not be empty"));
        }

        if self.site.title.trim().is_empty() {
            return Err(Error::config("site.title must not be empty"));
        }

        if self.filter.days < 0 {
            return Err(Error::config("filter.days must not be negative"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCategory, UcpnzErrorTrait};

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.filter.days, 3);
        assert_eq!(config.site.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_request_timeout_parses() {
        let site = SiteConfig {
            timeout: "15s".to_string(),
            ..Default::default()
        };
        assert_eq!(site.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_request_timeout_falls_back() {
        let site = SiteConfig {
            timeout: "soon".to_string(),
            ..Default::default()
        };
        assert_eq!(site.request_timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_validate_rejects_empty_domain() {
        let mut config = Config::default();
        config.site.domain = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg == "site.domain must not be empty"));
        assert_eq!(err.category(), ErrorCategory::Config);
    }

    #[test]
    fn test_validate_rejects_negative_days() {
        let mut config = Config::default();
        config.filter.days = -1;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [site]
            title = "联合新闻"
            "#,
        )
        .unwrap();
        assert_eq!(config.site.title, "联合新闻");
        assert_eq!(config.site.domain, "ucpnz.co.nz");
        assert_eq!(config.filter.days, 3);
    }
}
