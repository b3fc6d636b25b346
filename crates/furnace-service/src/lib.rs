//! Furnace controller service.
//!
//! This crate provides a small HTTP service that:
//! - Serves the current furnace temperature at `GET /current_temperature`
//! - Holds a heater setpoint that can be read and changed over HTTP
//! - Decides the heater relay state and logs low-temperature alerts
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/furnace/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [sensor]
//! source = "mock"
//! min = 20.0
//! max = 1500.0
//! latency_ms = 1500
//! rtd = false
//!
//! [control]
//! setpoint = 900.0
//! interval_secs = 30
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod state;

pub use config::{Config, ConfigError, ControlConfig, SensorConfig, ServerConfig};
pub use controller::{Controller, evaluate};
pub use state::{AppState, ControlState};
