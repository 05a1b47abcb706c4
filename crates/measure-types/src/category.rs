use serde::{Deserialize, Serialize};

/// Annotation categories used to pick a label icon and row title.
///
/// These are not tool modes: one pick can emit several categories at once
/// (a second point adds a `Points` entry and a `Coordinates` distance label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Points,
    Edge,
    Angle,
    Coordinates,
    Radius,
    EdgeAngle,
}

impl Category {
    /// Title shown in front of the value in the measurement list.
    pub fn title(self) -> &'static str {
        match self {
            Category::Points | Category::Coordinates => "Distance",
            Category::Edge => "Length",
            Category::Angle | Category::EdgeAngle => "Angle",
            Category::Radius => "Radius",
        }
    }

    /// Icon key understood by the panel.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Points | Category::Coordinates => "coordinates",
            Category::Edge => "edge",
            Category::Angle | Category::EdgeAngle => "angle",
            Category::Radius => "radius",
        }
    }

    pub fn is_angle(self) -> bool {
        matches!(self, Category::Angle | Category::EdgeAngle)
    }
}
