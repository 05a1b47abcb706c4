//! Display formatting of measurement values.

use serde::{Deserialize, Serialize};

use measure_types::{AngleUnit, Vec3};

use crate::units::UnitConverter;

/// Host-provided display precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub decimal_places: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { decimal_places: 2 }
    }
}

/// Largest supported number of decimal places.
pub const MAX_DECIMAL_PLACES: usize = 15;

/// Fixed-point formatting with `places` decimals, capped at
/// [`MAX_DECIMAL_PLACES`]. Negative zero prints as zero.
pub fn format_fixed(value: f64, places: usize) -> String {
    let text = format!("{:.*}", places.min(MAX_DECIMAL_PLACES), value);
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Turns canonical values into display values and label strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Formatter {
    pub units: UnitConverter,
    pub display: DisplaySettings,
}

impl Formatter {
    pub fn new(units: UnitConverter, display: DisplaySettings) -> Self {
        Self { units, display }
    }

    pub fn length_value(&self, mm: f64) -> f64 {
        self.units.to_display_length(mm)
    }

    pub fn angle_value(&self, degrees: f64) -> f64 {
        self.units.to_display_angle(degrees)
    }

    pub fn fixed(&self, value: f64) -> String {
        format_fixed(value, self.display.decimal_places)
    }

    /// `"10.00 mm"`
    pub fn length_label(&self, mm: f64) -> String {
        format!(
            "{} {}",
            self.fixed(self.length_value(mm)),
            self.units.length.suffix()
        )
    }

    /// `"90.00°"` in degrees, `"1.57 rad"` in radians.
    pub fn angle_label(&self, degrees: f64) -> String {
        let value = self.fixed(self.angle_value(degrees));
        match self.units.angle {
            AngleUnit::Degrees => format!("{}{}", value, self.units.angle.suffix()),
            AngleUnit::Radians => format!("{} {}", value, self.units.angle.suffix()),
        }
    }

    /// Row text such as `"Distance: 10.00 mm"`. `value` is already in display units.
    pub fn row_text(&self, title: &str, value: f64, unit: &str) -> String {
        format!("{}: {} {}", title, self.fixed(value), unit)
    }

    /// `"3: X 1.00, Y 2.00, Z 3.00"`
    pub fn coordinate_text(&self, number: u32, p: &Vec3) -> String {
        format!(
            "{}: X {}, Y {}, Z {}",
            number,
            self.fixed(p.x),
            self.fixed(p.y),
            self.fixed(p.z)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_uses_requested_places() {
        assert_eq!(format_fixed(10.0, 2), "10.00");
        assert_eq!(format_fixed(1.5707963, 2), "1.57");
        assert_eq!(format_fixed(2.0, 0), "2");
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        assert_eq!(format_fixed(-0.0001, 2), "0.00");
        assert_eq!(format_fixed(-0.5, 2), "-0.50");
    }
}
