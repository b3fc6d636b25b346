//! Application state shared across handlers.

use std::sync::Arc;

use furnace_core::{HeaterDecision, TemperatureSource};
use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::config::Config;

/// Shared application state.
pub struct AppState {
    /// Where temperatures come from.
    pub source: Box<dyn TemperatureSource>,
    /// Configuration the service was started with.
    pub config: Config,
    /// Current setpoint and last heater decision.
    pub control: RwLock<ControlState>,
}

impl AppState {
    /// Create new application state.
    pub fn new(source: Box<dyn TemperatureSource>, config: Config) -> Arc<Self> {
        let control = ControlState::new(config.control.setpoint);
        Arc::new(Self {
            source,
            config,
            control: RwLock::new(control),
        })
    }
}

/// Mutable controller state.
#[derive(Debug, Clone, Serialize)]
pub struct ControlState {
    /// Target temperature in °C.
    pub setpoint: f64,
    /// Temperature seen by the last evaluation, if it produced one.
    pub last_temperature: Option<f64>,
    /// Relay and alert state from the last evaluation.
    pub decision: HeaterDecision,
    /// When the last evaluation ran.
    #[serde(with = "time::serde::rfc3339::option")]
    pub evaluated_at: Option<OffsetDateTime>,
}

impl ControlState {
    /// Idle state for a fresh setpoint.
    pub fn new(setpoint: f64) -> Self {
        Self {
            setpoint,
            last_temperature: None,
            decision: HeaterDecision {
                heating: false,
                alert: false,
            },
            evaluated_at: None,
        }
    }
}
