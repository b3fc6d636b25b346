//! Temperature sources for the furnace monitor.
//!
//! This crate answers one question, "how hot is the furnace right now?", from
//! either a simulated sensor or a networked one.
//!
//! # Features
//!
//! - **Simulated sensor**: random readings with configurable latency and failures
//! - **HTTP sensor**: `GET /current_temperature` on a sensor host
//! - **RTD conversion**: raw ADC value to °C for a PT100-style probe
//! - **Heater control**: relay and alert decision against a setpoint
//!
//! # Quick Start
//!
//! ```no_run
//! use furnace_core::{SourceKind, build_source, MockSensor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = build_source(SourceKind::Http, "http://localhost:8080", MockSensor::new())?;
//!     match source.read_temperature().await? {
//!         Some(t) => println!("{:.0} °C", t),
//!         None => println!("no data"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod adc;
pub mod client;
pub mod error;
pub mod heater;
pub mod mock;
pub mod traits;

pub use adc::adc_to_celsius;
pub use client::{SensorClient, TemperatureResponse};
pub use error::{Error, Result};
pub use heater::{ALERT_MARGIN, HeaterDecision};
pub use mock::MockSensor;
pub use traits::{SourceKind, TemperatureSource, positive_or_none};

/// Build the source selected by `kind`.
///
/// `url` is only used for [`SourceKind::Http`]; `mock` only for
/// [`SourceKind::Mock`].
pub fn build_source(
    kind: SourceKind,
    url: &str,
    mock: MockSensor,
) -> Result<Box<dyn TemperatureSource>> {
    match kind {
        SourceKind::Mock => Ok(Box::new(mock)),
        SourceKind::Http => Ok(Box::new(SensorClient::new(url)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_mock_source() {
        let source = build_source(SourceKind::Mock, "", MockSensor::new().with_fixed(42.0)).unwrap();
        assert_eq!(source.name(), "mock");
        assert_eq!(source.read_temperature().await.unwrap(), Some(42.0));
    }

    #[test]
    fn test_build_http_source_validates_url() {
        assert!(build_source(SourceKind::Http, "ftp://nope", MockSensor::new()).is_err());
        let source = build_source(SourceKind::Http, "http://127.0.0.1:9", MockSensor::new()).unwrap();
        assert_eq!(source.name(), "http://127.0.0.1:9");
    }
}
