//! Server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use furnace_core::{MockSensor, SourceKind};
use serde::{Deserialize, Serialize};

/// Longest simulated latency accepted from configuration.
pub const MAX_LATENCY_MS: u64 = 60_000;

/// Server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server settings.
    pub server: ServerConfig,
    /// Where temperatures come from.
    pub sensor: SensorConfig,
    /// Heater control settings.
    pub control: ControlConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Validate the configuration and return any errors.
    ///
    /// ```
    /// use furnace_service::Config;
    ///
    /// let config = Config::default();
    /// config.validate().expect("Default config should be valid");
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.server.validate());
        errors.extend(self.sensor.validate());
        errors.extend(self.control.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// The bind address must be a literal `ip:port` with a non-zero port.
    pub fn validate(&self) -> Vec<ValidationError> {
        let message = match self.bind.parse::<SocketAddr>() {
            Ok(addr) if addr.port() == 0 => "port cannot be 0".to_string(),
            Ok(_) => return Vec::new(),
            Err(e) => format!("'{}' is not an ip:port address: {}", self.bind, e),
        };
        vec![ValidationError {
            field: "server.bind".to_string(),
            message,
        }]
    }
}

/// Temperature source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// `mock` or `http`.
    pub source: SourceKind,
    /// Upstream sensor URL, used by the `http` source.
    pub url: String,
    /// Lowest simulated reading in °C.
    pub min: f64,
    /// Highest simulated reading in °C.
    pub max: f64,
    /// Simulated latency per read.
    pub latency_ms: u64,
    /// Simulate the RTD probe behind the ADC instead of a uniform range.
    pub rtd: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Mock,
            url: "http://127.0.0.1:8081".to_string(),
            min: furnace_core::mock::DEFAULT_MIN_CELSIUS,
            max: furnace_core::mock::DEFAULT_MAX_CELSIUS,
            latency_ms: 0,
            rtd: false,
        }
    }
}

impl SensorConfig {
    /// Validate sensor configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match self.source {
            SourceKind::Mock => {
                if !self.min.is_finite() || !self.max.is_finite() {
                    errors.push(ValidationError {
                        field: "sensor.min/max".to_string(),
                        message: "range bounds must be finite numbers".to_string(),
                    });
                } else if self.min > self.max {
                    errors.push(ValidationError {
                        field: "sensor.min".to_string(),
                        message: format!(
                            "min ({}) must not exceed max ({})",
                            self.min, self.max
                        ),
                    });
                }
                if self.latency_ms > MAX_LATENCY_MS {
                    errors.push(ValidationError {
                        field: "sensor.latency_ms".to_string(),
                        message: format!(
                            "latency {} ms exceeds maximum of {} ms",
                            self.latency_ms, MAX_LATENCY_MS
                        ),
                    });
                }
            }
            SourceKind::Http => {
                if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
                    errors.push(ValidationError {
                        field: "sensor.url".to_string(),
                        message: format!(
                            "URL must start with http:// or https://, got: {}",
                            self.url
                        ),
                    });
                }
            }
        }

        errors
    }

    /// The simulated sensor described by this configuration.
    pub fn mock_sensor(&self) -> MockSensor {
        let sensor = if self.rtd {
            MockSensor::new().with_rtd()
        } else {
            MockSensor::new().with_range(self.min, self.max)
        };
        sensor.with_latency(Duration::from_millis(self.latency_ms))
    }
}

/// Heater control configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Target temperature in °C.
    pub setpoint: f64,
    /// Seconds between background control evaluations; 0 disables the loop.
    pub interval_secs: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            setpoint: 25.0,
            interval_secs: 0,
        }
    }
}

impl ControlConfig {
    /// Validate control configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !self.setpoint.is_finite() {
            errors.push(ValidationError {
                field: "control.setpoint".to_string(),
                message: "setpoint must be a finite number".to_string(),
            });
        }
        errors
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path (e.g., `server.bind`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("furnace")
        .join("server.toml")
}
