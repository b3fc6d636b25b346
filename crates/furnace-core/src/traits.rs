//! Trait abstraction over where a temperature comes from.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Anything that can report the current furnace temperature.
///
/// Implemented by the simulated [`crate::MockSensor`] and the HTTP
/// [`crate::SensorClient`], so callers pick one at runtime.
///
/// # Example
///
/// ```
/// use furnace_core::{MockSensor, TemperatureSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> furnace_core::Result<()> {
/// let sensor = MockSensor::new().with_fixed(820.0);
/// assert_eq!(sensor.read_temperature().await?, Some(820.0));
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TemperatureSource: Send + Sync {
    /// Short description for logs.
    fn name(&self) -> &str;

    /// Current temperature in °C.
    ///
    /// `Ok(None)` means the source answered but has no data: a reading that
    /// is not a positive number.
    async fn read_temperature(&self) -> Result<Option<f64>>;
}

#[async_trait]
impl<T: TemperatureSource + ?Sized> TemperatureSource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn read_temperature(&self) -> Result<Option<f64>> {
        (**self).read_temperature().await
    }
}

#[async_trait]
impl<T: TemperatureSource + ?Sized> TemperatureSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn read_temperature(&self) -> Result<Option<f64>> {
        (**self).read_temperature().await
    }
}

/// Treat non-positive or non-finite values as "no data".
pub fn positive_or_none(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Which source to read from, chosen at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Simulated sensor with artificial latency.
    #[default]
    Mock,
    /// `GET /current_temperature` on the sensor host.
    Http,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Mock => write!(f, "mock"),
            SourceKind::Http => write!(f, "http"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" | "sim" | "simulated" => Ok(SourceKind::Mock),
            "http" | "network" => Ok(SourceKind::Http),
            other => Err(format!(
                "unknown source '{}': expected 'mock' or 'http'",
                other
            )),
        }
    }
}
