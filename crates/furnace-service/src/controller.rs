//! Heater control evaluation and the optional background loop.

use std::sync::Arc;
use std::time::Duration;

use furnace_core::HeaterDecision;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::state::{AppState, ControlState};

/// Read the source once and update the heater decision.
///
/// A failed or empty read switches the relay off; the setpoint is untouched.
pub async fn evaluate(state: &AppState) -> ControlState {
    let temperature = match state.source.read_temperature().await {
        Ok(value) => value,
        Err(e) => {
            warn!("Control read from {} failed: {}", state.source.name(), e);
            None
        }
    };

    let mut control = state.control.write().await;
    control.decision = match temperature {
        Some(current) => HeaterDecision::decide(current, control.setpoint),
        None => HeaterDecision {
            heating: false,
            alert: false,
        },
    };
    control.last_temperature = temperature;
    control.evaluated_at = Some(OffsetDateTime::now_utc());

    if control.decision.alert
        && let Some(current) = temperature
    {
        warn!(
            "Temperature is too low: {:.2} °C (setpoint {:.2} °C)",
            current, control.setpoint
        );
    }
    debug!(
        "Heater {} at {:?} °C",
        if control.decision.heating { "on" } else { "off" },
        temperature
    );

    control.clone()
}

/// Periodic control loop.
pub struct Controller {
    state: Arc<AppState>,
}

impl Controller {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Spawn the loop if `control.interval_secs` is non-zero.
    pub fn start(&self) -> Option<JoinHandle<()>> {
        let secs = self.state.config.control.interval_secs;
        if secs == 0 {
            info!("Background control loop disabled");
            return None;
        }

        info!("Starting control loop every {}s", secs);
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let mut timer = interval(Duration::from_secs(secs));
            loop {
                timer.tick().await;
                evaluate(&state).await;
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use furnace_core::MockSensor;

    fn state_with(sensor: MockSensor, setpoint: f64) -> Arc<AppState> {
        let mut config = Config::default();
        config.control.setpoint = setpoint;
        AppState::new(Box::new(sensor), config)
    }

    #[tokio::test]
    async fn test_evaluate_heats_below_setpoint() {
        let state = state_with(MockSensor::new().with_fixed(880.0), 900.0);
        let control = evaluate(&state).await;
        assert!(control.decision.heating);
        assert!(control.decision.alert);
        assert_eq!(control.last_temperature, Some(880.0));
        assert!(control.evaluated_at.is_some());
    }

    #[tokio::test]
    async fn test_evaluate_failed_read_turns_off() {
        let sensor = MockSensor::new().with_fixed(10.0);
        sensor.set_should_fail(true);
        let state = state_with(sensor, 900.0);

        let control = evaluate(&state).await;
        assert!(!control.decision.heating);
        assert_eq!(control.last_temperature, None);
        assert_eq!(control.setpoint, 900.0);
    }

    #[tokio::test]
    async fn test_disabled_loop_does_not_spawn() {
        let state = state_with(MockSensor::new(), 25.0);
        assert!(Controller::new(state).start().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_evaluates_periodically() {
        let mut config = Config::default();
        config.control.interval_secs = 5;
        config.control.setpoint = 100.0;
        let state = AppState::new(Box::new(MockSensor::new().with_fixed(50.0)), config);

        let handle = Controller::new(Arc::clone(&state)).start().unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        let control = state.control.read().await.clone();
        assert!(control.decision.heating);
        handle.abort();
    }
}
