use serde::{Deserialize, Serialize};

use crate::{ObjectId, Vec3};

/// A raw pick delivered by the picking subsystem.
///
/// Edge-like picks carry `start`/`end`, point-like picks carry `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Selection {
    Point(PointPick),
    Edge(EdgePick),
}

impl Selection {
    /// A plain point pick.
    pub fn point(center: Vec3) -> Self {
        Selection::Point(PointPick {
            center,
            radius: None,
        })
    }

    /// A point pick on a circular edge: `center` is the circle centre and
    /// `edge_start` a point on the circle, local to the edge's owning object.
    pub fn radius_point(center: Vec3, radius: f64, edge_start: Vec3) -> Self {
        Selection::Point(PointPick {
            center,
            radius: Some(RadiusPick { radius, edge_start }),
        })
    }

    /// An edge pick whose reported length is the endpoint distance.
    pub fn edge(start: Vec3, end: Vec3) -> Self {
        Selection::Edge(EdgePick {
            start,
            end,
            length: (end - start).norm(),
        })
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Selection::Edge(_))
    }
}

/// A picked point, or an edge endpoint/midpoint used as a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPick {
    /// World-space position of the pick.
    pub center: Vec3,
    /// Present when the pick landed on a circular edge.
    #[serde(default)]
    pub radius: Option<RadiusPick>,
}

/// Radius information attached to a point pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusPick {
    /// Circle radius in millimetres.
    pub radius: f64,
    /// A point on the circle, in the local space of the edge owner.
    pub edge_start: Vec3,
}

/// A picked edge. Endpoints are local to the owning object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgePick {
    pub start: Vec3,
    pub end: Vec3,
    /// Edge length in millimetres as measured by the picker.
    pub length: f64,
}

/// Which scene objects a pick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceMeta {
    /// The part the user clicked.
    pub part: ObjectId,
    /// The mesh owning the picked edge, when it differs from the part.
    #[serde(default)]
    pub edge_owner: Option<ObjectId>,
}

impl SourceMeta {
    pub fn part(part: ObjectId) -> Self {
        Self {
            part,
            edge_owner: None,
        }
    }

    pub fn with_edge_owner(part: ObjectId, edge_owner: ObjectId) -> Self {
        Self {
            part,
            edge_owner: Some(edge_owner),
        }
    }

    /// The object whose local space edge coordinates are expressed in.
    pub fn edge_object(&self) -> ObjectId {
        self.edge_owner.unwrap_or(self.part)
    }
}
