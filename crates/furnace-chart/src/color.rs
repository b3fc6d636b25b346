//! Temperature to color ramp.

use serde::Serialize;

use crate::transform::{MAX_TEMPERATURE, MIN_TEMPERATURE};

const MID_TEMPERATURE: f32 = 750.0;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const ORANGE: Self = Self::new(255, 128, 0);
    pub const GRAY: Self = Self::new(160, 160, 160);
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color of a temperature on the green → orange → red ramp.
///
/// - 0 °C: `(0, 255, 0)`
/// - 750 °C: `(255, 128, 0)`
/// - 1500 °C: `(255, 0, 0)`
///
/// Below 750 the red channel ramps up and green is `255 - red / 2`; above
/// 750 red stays at 255 while green falls from 128 to 0. Inputs outside
/// 0..=1500 are clamped.
pub fn temperature_to_color(temp: f32) -> Rgb {
    let temp = if temp.is_nan() {
        MIN_TEMPERATURE
    } else {
        temp.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
    };

    if temp == MID_TEMPERATURE {
        return Rgb::ORANGE;
    }

    if temp < MID_TEMPERATURE {
        let red = (temp / MID_TEMPERATURE * 255.0).round() as u8;
        Rgb::new(red, 255 - red / 2, 0)
    } else {
        let t = (temp - MID_TEMPERATURE) / (MAX_TEMPERATURE - MID_TEMPERATURE);
        let green = (128.0 * (1.0 - t)).round() as u8;
        Rgb::new(255, green, 0)
    }
}
