//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use furnace_core::SourceKind;
use serde::{Deserialize, Serialize};

/// Sensor URL used when neither flag nor config names one.
pub const DEFAULT_URL: &str = "http://localhost:8080";

/// Simulated latency used when neither flag nor config names one.
pub const DEFAULT_MOCK_LATENCY_MS: u64 = 1000;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default temperature source
    #[serde(default)]
    pub source: Option<SourceKind>,

    /// Sensor base URL for the http source
    #[serde(default)]
    pub url: Option<String>,

    /// Readings file location
    #[serde(default)]
    pub store: Option<PathBuf>,

    /// Simulated latency for the mock source, in milliseconds
    #[serde(default)]
    pub latency_ms: Option<u64>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Chart canvas settings
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Chart canvas settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

impl Config {
    /// Get the default config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("furnace")
            .join("config.toml")
    }

    /// Load config from `path`, or return default if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// A config with every default spelled out, for `config init`
    pub fn template() -> Self {
        Self {
            source: Some(SourceKind::Mock),
            url: Some(DEFAULT_URL.to_string()),
            store: Some(furnace_store::default_store_path()),
            latency_ms: Some(DEFAULT_MOCK_LATENCY_MS),
            no_color: false,
            chart: ChartConfig::default(),
        }
    }
}

/// Source from flag (or env), then config, then mock.
pub fn resolve_source(arg: Option<SourceKind>, config: &Config) -> SourceKind {
    arg.or(config.source).unwrap_or_default()
}

/// URL from flag (or env), then config, then [`DEFAULT_URL`].
pub fn resolve_url(arg: Option<String>, config: &Config) -> String {
    arg.or_else(|| config.url.clone())
        .unwrap_or_else(|| DEFAULT_URL.to_string())
}

/// Readings file from flag (or env), then config, then the platform default.
pub fn resolve_store_path(arg: Option<PathBuf>, config: &Config) -> PathBuf {
    arg.or_else(|| config.store.clone())
        .unwrap_or_else(furnace_store::default_store_path)
}

/// Mock latency from flag, then config, then [`DEFAULT_MOCK_LATENCY_MS`].
pub fn resolve_latency_ms(arg: Option<u64>, config: &Config) -> u64 {
    arg.or(config.latency_ms).unwrap_or(DEFAULT_MOCK_LATENCY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_source_prefers_arg() {
        let config = Config {
            source: Some(SourceKind::Mock),
            ..Default::default()
        };
        assert_eq!(resolve_source(Some(SourceKind::Http), &config), SourceKind::Http);
        assert_eq!(resolve_source(None, &config), SourceKind::Mock);
        assert_eq!(resolve_source(None, &Config::default()), SourceKind::Mock);
    }

    #[test]
    fn test_resolve_url_falls_back() {
        let config = Config {
            url: Some("http://furnace.local".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_url(None, &config), "http://furnace.local");
        assert_eq!(
            resolve_url(Some("http://other".to_string()), &config),
            "http://other"
        );
        assert_eq!(resolve_url(None, &Config::default()), DEFAULT_URL);
    }

    #[test]
    fn test_resolve_store_path() {
        let config = Config {
            store: Some(PathBuf::from("/data/readings.json")),
            ..Default::default()
        };
        assert_eq!(
            resolve_store_path(None, &config),
            PathBuf::from("/data/readings.json")
        );
        assert_eq!(
            resolve_store_path(None, &Config::default()),
            furnace_store::default_store_path()
        );
    }

    #[test]
    fn test_resolve_latency() {
        assert_eq!(resolve_latency_ms(Some(0), &Config::default()), 0);
        assert_eq!(
            resolve_latency_ms(None, &Config::default()),
            DEFAULT_MOCK_LATENCY_MS
        );
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("furnace").join("config.toml");

        let mut config = Config::template();
        config.chart.width = Some(1024.0);
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_load_invalid_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "source = 12").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("source = \"http\"\n[chart]\nheight = 300.0\n").unwrap();
        assert_eq!(config.source, Some(SourceKind::Http));
        assert_eq!(config.chart.height, Some(300.0));
        assert_eq!(config.url, None);
    }

    #[test]
    fn test_config_path() {
        assert!(Config::path().ends_with("furnace/config.toml"));
    }
}
