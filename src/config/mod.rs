//! Configuration management.
//!
//! TOML-backed, with defaults for every value so a missing file or section
//! never blocks startup. Sections:
//!
//! - `[general]` - display identity of the analyzer
//! - `[market]` - result limits for reports and routes
//! - `[export]` - where JSON export files land
//! - `[logging]` - log level
//!
//! Values a user can inflate (result limits) are clamped on load rather than
//! rejected.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Hard ceiling for per-report items, matching the largest panel the game
/// client renders comfortably.
pub const MAX_REPORT_ITEMS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Name shown in report headers.
    pub name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: "Transport Market Data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Products shown per overview or search report.
    pub max_report_items: usize,
    /// Routes returned by a route query.
    pub max_routes: usize,
    /// Hours covered by the "recent" column of usage summaries.
    pub stats_window_hours: i64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            max_report_items: 50,
            max_routes: 10,
            stats_window_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory export files are written into, relative to the working
    /// directory unless absolute.
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: "exports".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub market: MarketConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and clamp limits into range.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;
        config.clamp();
        Ok(config)
    }

    /// Write a default configuration file.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;
        Ok(())
    }

    fn clamp(&mut self) {
        self.market.max_report_items = self.market.max_report_items.clamp(1, MAX_REPORT_ITEMS);
        self.market.max_routes = self.market.max_routes.clamp(1, MAX_REPORT_ITEMS);
        if self.market.stats_window_hours < 1 {
            self.market.stats_window_hours = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.market.max_report_items, 50);
        assert_eq!(config.market.max_routes, 10);
        assert_eq!(config.export.directory, "exports");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[market]\nmax_routes = 3\n").unwrap();
        assert_eq!(config.market.max_routes, 3);
        assert_eq!(config.market.max_report_items, 50);
        assert_eq!(config.export.directory, "exports");
    }

    #[tokio::test]
    async fn load_clamps_out_of_range_limits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            "[market]\nmax_report_items = 9999\nmax_routes = 0\nstats_window_hours = -5\n",
        )
        .await
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.market.max_report_items, MAX_REPORT_ITEMS);
        assert_eq!(config.market.max_routes, 1);
        assert_eq!(config.market.stats_window_hours, 1);
    }

    #[tokio::test]
    async fn create_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::create_default(path.to_str().unwrap()).await.unwrap();
        let loaded = Config::load(path.to_str().unwrap()).await.unwrap();
        assert_eq!(loaded.market.max_report_items, 50);
    }
}
