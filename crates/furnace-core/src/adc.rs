//! Conversion of the RTD divider's ADC reading to degrees Celsius.
//!
//! The probe sits in a voltage divider with a 50 Ω reference resistor and
//! feeds an MCP3008 channel referenced to 3.3 V. The divider output spans
//! from the probe's 39.225 Ω point (-50 °C) to its 92.775 Ω point (500 °C).

/// ADC reference voltage.
pub const REFERENCE_VOLTS: f64 = 3.3;
/// Reference resistor of the divider, in ohms.
pub const DIVIDER_OHMS: f64 = 50.0;
/// Probe resistance at the bottom of the range.
pub const LOW_PROBE_OHMS: f64 = 39.225;
/// Probe resistance at the top of the range.
pub const HIGH_PROBE_OHMS: f64 = 92.775;
/// Temperature at the bottom of the range.
pub const LOW_CELSIUS: f64 = -50.0;
/// Temperature at the top of the range.
pub const HIGH_CELSIUS: f64 = 500.0;

fn divider_volts(probe_ohms: f64) -> f64 {
    REFERENCE_VOLTS * probe_ohms / (DIVIDER_OHMS + probe_ohms)
}

/// Convert a normalized ADC value (`0.0..=1.0` of full scale) to °C.
///
/// Returns `None` for values outside the ADC range. The result is rounded to
/// two decimals.
pub fn adc_to_celsius(value: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&value) {
        return None;
    }

    let volts = value * REFERENCE_VOLTS;
    let low = divider_volts(LOW_PROBE_OHMS);
    let high = divider_volts(HIGH_PROBE_OHMS);
    let ratio = (volts - low) / (high - low);
    let celsius = ratio * ratio * (HIGH_CELSIUS - LOW_CELSIUS) + LOW_CELSIUS;

    Some((celsius * 100.0).round() / 100.0)
}

/// Normalized ADC value at which the divider reads `probe_ohms`.
pub fn adc_value_for_probe(probe_ohms: f64) -> f64 {
    divider_volts(probe_ohms) / REFERENCE_VOLTS
}
