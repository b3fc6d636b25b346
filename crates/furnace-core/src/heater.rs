//! Heater relay decision against a setpoint.

use serde::Serialize;

/// How far below the setpoint the furnace may drop before an alert fires.
pub const ALERT_MARGIN: f64 = 5.0;

/// What the controller should do for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaterDecision {
    /// Relay on.
    pub heating: bool,
    /// Temperature has fallen [`ALERT_MARGIN`] or more below the setpoint.
    pub alert: bool,
}

impl HeaterDecision {
    /// Decide for `current` °C against `setpoint` °C.
    ///
    /// Heating is on strictly below the setpoint. The alert fires at or below
    /// `setpoint - ALERT_MARGIN`, so it implies heating.
    pub fn decide(current: f64, setpoint: f64) -> Self {
        Self {
            heating: current < setpoint,
            alert: current <= setpoint - ALERT_MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_setpoint_is_idle() {
        let d = HeaterDecision::decide(900.0, 900.0);
        assert!(!d.heating);
        assert!(!d.alert);
    }

    #[test]
    fn test_just_below_setpoint_heats() {
        let d = HeaterDecision::decide(899.0, 900.0);
        assert!(d.heating);
        assert!(!d.alert);
    }

    #[test]
    fn test_alert_boundary_is_inclusive() {
        let d = HeaterDecision::decide(895.0, 900.0);
        assert!(d.heating);
        assert!(d.alert);
    }

    #[test]
    fn test_above_setpoint() {
        assert_eq!(
            HeaterDecision::decide(1200.0, 900.0),
            HeaterDecision {
                heating: false,
                alert: false
            }
        );
    }
}
