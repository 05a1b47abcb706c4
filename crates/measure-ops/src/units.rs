use serde::{Deserialize, Serialize};

use measure_types::{AngleUnit, LengthUnit, MM_PER_INCH};

/// Converts canonical values (millimetres, degrees) into the current display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitConverter {
    pub length: LengthUnit,
    pub angle: AngleUnit,
}

impl UnitConverter {
    pub fn new(length: LengthUnit, angle: AngleUnit) -> Self {
        Self { length, angle }
    }

    pub fn to_display_length(&self, mm: f64) -> f64 {
        match self.length {
            LengthUnit::Millimeters => mm,
            LengthUnit::Inches => mm / MM_PER_INCH,
        }
    }

    pub fn to_display_angle(&self, degrees: f64) -> f64 {
        match self.angle {
            AngleUnit::Degrees => degrees,
            AngleUnit::Radians => degrees.to_radians(),
        }
    }
}
