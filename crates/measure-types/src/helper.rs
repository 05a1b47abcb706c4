use serde::{Deserialize, Serialize};

/// Identity of a helper object living in the host scene.
/// Allocated by the scene; valid until the helper is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HelperId(pub u64);

impl std::fmt::Display for HelperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a helper object draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelperKind {
    Marker,
    Segment,
    Arc,
    Label,
}

/// How a segment is drawn and whether it takes part in angle chaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentStyle {
    /// A picked edge, drawn as a thin solid tube.
    Edge,
    /// A dashed distance line between two picked points.
    Measurement,
    /// A dashed line from a circle to its centre. Never chained.
    Radius,
}

impl SegmentStyle {
    pub fn is_radius(self) -> bool {
        matches!(self, SegmentStyle::Radius)
    }
}

/// Text label flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelKind {
    Length,
    Angle,
    PointIndex,
}

/// Which labels attached to a primitive a visibility or highlight change reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LabelScope {
    #[default]
    All,
    /// Length and angle labels; the index label stays as it is.
    LengthOnly,
    /// Only the index label.
    IndexOnly,
}

impl LabelScope {
    pub fn includes(self, kind: LabelKind) -> bool {
        match self {
            LabelScope::All => true,
            LabelScope::LengthOnly => kind != LabelKind::PointIndex,
            LabelScope::IndexOnly => kind == LabelKind::PointIndex,
        }
    }
}
