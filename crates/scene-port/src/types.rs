use serde::{Deserialize, Serialize};

use measure_types::{Category, HelperId, HelperKind, LabelKind, SegmentStyle, Vec3};

/// A drawable helper handed to the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    /// Small sphere marking a picked point.
    Marker { position: Vec3, radius: f64 },
    /// Straight segment between two world-space points.
    Segment {
        start: Vec3,
        end: Vec3,
        style: SegmentStyle,
        thickness: f64,
    },
    /// Polyline approximating an angle arc.
    Arc { points: Vec<Vec3> },
    /// Screen-anchored text overlay.
    Label {
        position: Vec3,
        text: String,
        kind: LabelKind,
        icon: Option<Category>,
    },
}

impl Primitive {
    pub fn kind(&self) -> HelperKind {
        match self {
            Primitive::Marker { .. } => HelperKind::Marker,
            Primitive::Segment { .. } => HelperKind::Segment,
            Primitive::Arc { .. } => HelperKind::Arc,
            Primitive::Label { .. } => HelperKind::Label,
        }
    }

    /// Label text, if this is a label.
    pub fn text(&self) -> Option<&str> {
        match self {
            Primitive::Label { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Anchor position used for labels and markers.
    pub fn anchor(&self) -> Option<Vec3> {
        match self {
            Primitive::Marker { position, .. } | Primitive::Label { position, .. } => {
                Some(*position)
            }
            Primitive::Segment { start, end, .. } => Some((start + end) * 0.5),
            Primitive::Arc { points } => points.get(points.len() / 2).copied(),
        }
    }
}

/// Errors reported by a scene.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneError {
    #[error("helper not found in scene: {id}")]
    HelperNotFound { id: HelperId },

    #[error("scene error: {message}")]
    Other { message: String },
}
