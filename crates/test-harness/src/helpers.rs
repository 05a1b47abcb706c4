//! Helper functions: error type, pick constructors, shape outlines.

use measure_types::{Selection, Vec3};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("part not found: {name}")]
    PartNotFound { name: String },

    #[error("dispatch error: {message}")]
    DispatchError { message: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },
}

// ── Pick Constructors ───────────────────────────────────────────────────────

pub fn v(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

/// A point pick on the centre of a circular edge of an untransformed part.
/// The circle point handed to the engine lies along +X.
pub fn circle_pick(center: Vec3, radius: f64) -> Selection {
    Selection::radius_point(center, radius, center + Vec3::x() * radius)
}

// ── Shape Outlines ──────────────────────────────────────────────────────────

/// The four edges of an axis-aligned rectangle in the XY plane, walked
/// counter-clockwise from `origin`.
pub fn rect_edges(origin: Vec3, w: f64, h: f64) -> Vec<(Vec3, Vec3)> {
    let corners = rect_corners(origin, w, h);
    (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect()
}

/// Corners of an axis-aligned rectangle in the XY plane, counter-clockwise.
pub fn rect_corners(origin: Vec3, w: f64, h: f64) -> [Vec3; 4] {
    [
        origin,
        origin + v(w, 0.0, 0.0),
        origin + v(w, h, 0.0),
        origin + v(0.0, h, 0.0),
    ]
}

/// Vertices of a regular polygon in the XY plane, counter-clockwise from +X.
pub fn polygon_corners(center: Vec3, radius: f64, sides: usize) -> Vec<Vec3> {
    (0..sides)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / sides as f64;
            center + v(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect()
}
