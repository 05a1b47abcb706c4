//! Configuration for a measurement tool session.

use serde::{Deserialize, Serialize};

use measure_ops::{ArcSettings, DisplaySettings, Formatter, UnitConverter, MAX_DECIMAL_PLACES};
use measure_types::{AngleUnit, LengthUnit};

/// Sizes and offsets of the helpers the renderer draws (millimetres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Radius of the sphere marking a picked point.
    pub marker_radius: f64,
    /// Tube thickness of a picked edge.
    pub edge_thickness: f64,
    /// Vertical lift of every index label above its anchor.
    pub index_label_lift: f64,
    /// Added to `index_label_lift` for edge index labels, which sit above
    /// the length label at the edge midpoint.
    pub edge_index_lift: f64,
    pub arc: ArcSettings,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            marker_radius: 0.8,
            edge_thickness: 0.3,
            index_label_lift: 10.0,
            edge_index_lift: 7.0,
            arc: ArcSettings::default(),
        }
    }
}

/// Initial preferences and drawing style of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub length_unit: LengthUnit,
    pub angle_unit: AngleUnit,
    /// Decimal places of every formatted value.
    pub decimal_places: usize,
    pub render: RenderStyle,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            length_unit: LengthUnit::default(),
            angle_unit: AngleUnit::default(),
            decimal_places: DisplaySettings::default().decimal_places,
            render: RenderStyle::default(),
        }
    }
}

impl MeasureConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::InvalidPrecision {
                places: self.decimal_places,
            });
        }
        Ok(())
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(
            UnitConverter::new(self.length_unit, self.angle_unit),
            DisplaySettings {
                decimal_places: self.decimal_places,
            },
        )
    }
}

/// Errors while loading a config.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    ParseError(String),

    #[error("decimal places out of range: {places}")]
    InvalidPrecision { places: usize },
}
