//! Simulated furnace sensor.
//!
//! Stands in for the network round trip during development and tests.
//!
//! # Features
//!
//! - **Latency simulation**: delay each read like a slow network call
//! - **Failure injection**: make reads fail on demand
//! - **Fixed values**: pin the reported temperature for deterministic tests
//! - **RTD simulation**: draw raw ADC values and convert them like real hardware

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::adc::{HIGH_PROBE_OHMS, LOW_PROBE_OHMS, adc_to_celsius, adc_value_for_probe};
use crate::error::{Error, Result};
use crate::traits::{TemperatureSource, positive_or_none};

/// Default lower bound of simulated readings.
pub const DEFAULT_MIN_CELSIUS: f64 = 20.0;
/// Default upper bound of simulated readings.
pub const DEFAULT_MAX_CELSIUS: f64 = 1500.0;

/// How the mock produces values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Generator {
    /// Uniformly random °C in `min..=max`.
    Uniform { min: f64, max: f64 },
    /// Uniformly random raw ADC value across the probe's range, converted.
    Rtd,
}

/// A simulated furnace temperature sensor.
///
/// Reads are independent: two overlapping reads each produce their own value.
pub struct MockSensor {
    name: String,
    generator: Generator,
    fixed: Mutex<Option<f64>>,
    /// Simulated read latency in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
    should_fail: AtomicBool,
    read_count: AtomicU32,
}

impl std::fmt::Debug for MockSensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSensor")
            .field("name", &self.name)
            .field("generator", &self.generator)
            .field("latency_ms", &self.latency_ms.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSensor {
    /// Create a sensor reporting random values in the default range.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            generator: Generator::Uniform {
                min: DEFAULT_MIN_CELSIUS,
                max: DEFAULT_MAX_CELSIUS,
            },
            fixed: Mutex::new(None),
            latency_ms: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
            read_count: AtomicU32::new(0),
        }
    }

    /// Report uniformly random values in `min..=max`. Bounds are swapped if reversed.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.generator = Generator::Uniform { min, max };
        self
    }

    /// Simulate an RTD probe behind the ADC instead of drawing °C directly.
    pub fn with_rtd(mut self) -> Self {
        self.generator = Generator::Rtd;
        self
    }

    /// Delay every read by `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.set_latency(latency);
        self
    }

    /// Always report `celsius`.
    pub fn with_fixed(self, celsius: f64) -> Self {
        self.set_fixed(Some(celsius));
        self
    }

    /// Current value generator.
    pub fn generator(&self) -> Generator {
        self.generator
    }

    /// Change the simulated latency.
    pub fn set_latency(&self, latency: Duration) {
        let ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(ms, Ordering::Relaxed);
    }

    /// Pin (or unpin with `None`) the reported value.
    pub fn set_fixed(&self, celsius: Option<f64>) {
        *self.fixed.lock().unwrap_or_else(|p| p.into_inner()) = celsius;
    }

    /// Make subsequent reads fail.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    /// Number of successful reads so far.
    pub fn read_count(&self) -> u32 {
        self.read_count.load(Ordering::Relaxed)
    }

    fn sample(&self) -> f64 {
        if let Some(value) = *self.fixed.lock().unwrap_or_else(|p| p.into_inner()) {
            return value;
        }

        let mut rng = rand::rng();
        match self.generator {
            Generator::Uniform { min, max } => rng.random_range(min..=max),
            Generator::Rtd => {
                let low = adc_value_for_probe(LOW_PROBE_OHMS);
                let high = adc_value_for_probe(HIGH_PROBE_OHMS);
                let raw = rng.random_range(low..=high);
                adc_to_celsius(raw).unwrap_or(0.0)
            }
        }
    }
}

#[async_trait]
impl TemperatureSource for MockSensor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_temperature(&self) -> Result<Option<f64>> {
        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.should_fail.load(Ordering::Relaxed) {
            return Err(Error::Simulated("sensor offline".to_string()));
        }

        let value = self.sample();
        self.read_count.fetch_add(1, Ordering::Relaxed);
        debug!("Mock sensor read {:.2} °C", value);
        Ok(positive_or_none(value))
    }
}
