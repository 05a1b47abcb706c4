//! Geometric derivation: distances, edge angles, and the arc drawn between
//! two consecutive segments.
//!
//! Everything here works in canonical units (millimetres, degrees).
//! Conversion to display units is the caller's job.

use nalgebra::{Unit, UnitQuaternion};
use serde::{Deserialize, Serialize};

use measure_types::Vec3;

/// Lengths below this are treated as zero (millimetres).
const LENGTH_EPS: f64 = 1e-9;

/// Angles closer than this to 0 or 180 degrees are treated as collinear (radians).
const ANGLE_EPS: f64 = 1e-9;

/// A straight world-space segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    pub fn is_degenerate(&self) -> bool {
        self.length() < LENGTH_EPS
    }
}

/// Shape of the arc drawn between two segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcSettings {
    /// Arc radius as a fraction of the shorter arm.
    pub radius_fraction: f64,
    /// Number of polyline pieces approximating the arc.
    pub segments: usize,
}

impl Default for ArcSettings {
    fn default() -> Self {
        Self {
            radius_fraction: 0.25,
            segments: 16,
        }
    }
}

/// Angle at the vertex shared by two consecutive segments, with the arc that
/// visualises it.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAngle {
    /// Angle between the two arms at the vertex, in degrees, in `[0, 180]`.
    pub angle_degrees: f64,
    /// The shared (or closest) endpoint.
    pub vertex: Vec3,
    /// Arc polyline from the first arm to the second.
    pub curve: Vec<Vec3>,
    /// Point halfway along the arc; anchors the angle label.
    pub curve_midpoint: Vec3,
}

/// Euclidean distance in millimetres.
pub fn distance(a: &Vec3, b: &Vec3) -> f64 {
    (b - a).norm()
}

/// Angle between the direction vectors `end - start` of two edges, in degrees.
///
/// Returns 0 when either edge is degenerate.
pub fn angle_between_edges(a: &Segment, b: &Segment) -> f64 {
    angle_between(&a.direction(), &b.direction()).to_degrees()
}

/// Angle at the vertex two consecutive segments share.
///
/// The vertex is taken as the midpoint of the closest pair of endpoints, so
/// segments that only approximately meet still produce a sensible arc.
/// Returns `None` when either segment is degenerate.
pub fn angle_between_consecutive_segments(
    prev: &Segment,
    curr: &Segment,
    arc: &ArcSettings,
) -> Option<SegmentAngle> {
    if prev.is_degenerate() || curr.is_degenerate() {
        return None;
    }

    let (vertex, prev_far, curr_far) = shared_vertex(prev, curr);
    let arm_prev = prev_far - vertex;
    let arm_curr = curr_far - vertex;
    let (len_prev, len_curr) = (arm_prev.norm(), arm_curr.norm());
    if len_prev < LENGTH_EPS || len_curr < LENGTH_EPS {
        return None;
    }

    let radius = arc.radius_fraction * len_prev.min(len_curr);
    Some(sample_arc(vertex, &arm_prev, &arm_curr, radius, arc))
}

/// Angle between the directions of two chained edges, with an arc at their
/// shared vertex that starts along the first edge's continuation and sweeps
/// to the second edge.
///
/// The arc spans the reported angle, unlike the arm-to-arm arc of
/// [`angle_between_consecutive_segments`]. Returns `None` when either edge
/// is degenerate.
pub fn angle_between_edge_directions(
    prev: &Segment,
    curr: &Segment,
    arc: &ArcSettings,
) -> Option<SegmentAngle> {
    if prev.is_degenerate() || curr.is_degenerate() {
        return None;
    }

    let (vertex, _, _) = shared_vertex(prev, curr);
    let radius = arc.radius_fraction * prev.length().min(curr.length());
    Some(sample_arc(
        vertex,
        &prev.direction(),
        &curr.direction(),
        radius,
        arc,
    ))
}

/// Sample the arc of `radius` around `vertex` rotating `from` onto `to`.
fn sample_arc(vertex: Vec3, from: &Vec3, to: &Vec3, radius: f64, arc: &ArcSettings) -> SegmentAngle {
    let theta = angle_between(from, to);
    let from = from.normalize();
    let axis = rotation_axis(&from, to);

    let steps = arc.segments.max(1);
    let point_at = |t: f64| -> Vec3 {
        let rotation = UnitQuaternion::from_axis_angle(&axis, theta * t);
        vertex + rotation * from * radius
    };

    let curve = (0..=steps)
        .map(|i| point_at(i as f64 / steps as f64))
        .collect();

    SegmentAngle {
        angle_degrees: theta.to_degrees(),
        vertex,
        curve,
        curve_midpoint: point_at(0.5),
    }
}

/// Unsigned angle between two vectors in radians, robust against rounding.
fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < LENGTH_EPS * LENGTH_EPS {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Pick the closest pair of endpoints. Returns (vertex, far end of prev, far end of curr).
fn shared_vertex(prev: &Segment, curr: &Segment) -> (Vec3, Vec3, Vec3) {
    let candidates = [
        (prev.start, prev.end, curr.start, curr.end),
        (prev.start, prev.end, curr.end, curr.start),
        (prev.end, prev.start, curr.start, curr.end),
        (prev.end, prev.start, curr.end, curr.start),
    ];

    let mut best = candidates[0];
    let mut best_gap = f64::INFINITY;
    for c in candidates {
        let gap = distance(&c.0, &c.2);
        if gap < best_gap {
            best_gap = gap;
            best = c;
        }
    }

    let (p_near, p_far, c_near, c_far) = best;
    ((p_near + c_near) * 0.5, p_far, c_far)
}

/// Axis that rotates `from` towards `to`. For (anti)parallel arms any
/// perpendicular axis works.
fn rotation_axis(from: &Vec3, to: &Vec3) -> Unit<Vec3> {
    let cross = from.cross(to);
    if cross.norm() > ANGLE_EPS * to.norm() {
        return Unit::new_normalize(cross);
    }
    // Cross with the world axis least aligned with `from`.
    let helper = if from.x.abs() < 0.9 {
        Vec3::x()
    } else {
        Vec3::y()
    };
    Unit::new_normalize(from.cross(&helper))
}
