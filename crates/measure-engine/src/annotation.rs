//! AnnotationRenderer: owns every helper the measurement tool adds to the scene.
//!
//! Each helper is tracked with its kind and, for labels, the helper it
//! annotates. Visibility and highlight changes on a primitive reach the labels
//! attached to it, filtered by a [`LabelScope`].

use std::collections::BTreeMap;

use tracing::debug;

use measure_ops::{
    angle_between_consecutive_segments, angle_between_edge_directions, Formatter, Segment,
};
use measure_types::{Category, HelperId, HelperKind, LabelKind, LabelScope, SegmentStyle, Vec3};
use scene_port::{Primitive, Scene, SceneError};

use crate::config::RenderStyle;

/// Errors from the renderer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("helper {id} is not tracked by the renderer")]
    UnknownHelper { id: HelperId },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Bookkeeping for one helper in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperRecord {
    pub kind: HelperKind,
    /// The primitive a label annotates.
    pub owner: Option<HelperId>,
    pub label_kind: Option<LabelKind>,
    pub style: Option<SegmentStyle>,
}

/// How the angle between a segment and its predecessor is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleMeasure {
    /// Between the arms at the shared vertex (point-distance chains).
    AtVertex,
    /// Between the direction vectors (edge chains).
    BetweenDirections,
}

/// The segment a new line continues from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleChain {
    pub previous: Segment,
    pub measure: AngleMeasure,
}

impl AngleChain {
    pub fn category(&self) -> Category {
        match self.measure {
            AngleMeasure::AtVertex => Category::Angle,
            AngleMeasure::BetweenDirections => Category::EdgeAngle,
        }
    }
}

/// Helpers drawn for a chained angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnAngle {
    pub arc: HelperId,
    pub label: HelperId,
    /// Canonical degrees.
    pub degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnSegment {
    pub line: HelperId,
    pub angle: Option<DrawnAngle>,
}

/// Draws markers, segments, arcs and labels into a [`Scene`].
pub struct AnnotationRenderer<S: Scene> {
    scene: S,
    helpers: BTreeMap<HelperId, HelperRecord>,
    style: RenderStyle,
}

impl<S: Scene> AnnotationRenderer<S> {
    pub fn new(scene: S, style: RenderStyle) -> Self {
        Self {
            scene,
            helpers: BTreeMap::new(),
            style,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn helpers(&self) -> &BTreeMap<HelperId, HelperRecord> {
        &self.helpers
    }

    pub fn helper(&self, id: HelperId) -> Option<&HelperRecord> {
        self.helpers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Labels attached to `owner`, in creation order.
    pub fn labels_for(&self, owner: HelperId) -> Vec<HelperId> {
        self.helpers
            .iter()
            .filter(|(_, r)| r.owner == Some(owner))
            .map(|(id, _)| *id)
            .collect()
    }

    fn track(&mut self, primitive: Primitive, owner: Option<HelperId>) -> HelperId {
        let record = HelperRecord {
            kind: primitive.kind(),
            owner,
            label_kind: match &primitive {
                Primitive::Label { kind, .. } => Some(*kind),
                _ => None,
            },
            style: match &primitive {
                Primitive::Segment { style, .. } => Some(*style),
                _ => None,
            },
        };
        let id = self.scene.add(primitive);
        debug!(%id, kind = ?record.kind, "helper added");
        self.helpers.insert(id, record);
        id
    }

    fn require(&self, id: HelperId) -> Result<&HelperRecord, RenderError> {
        self.helpers
            .get(&id)
            .ok_or(RenderError::UnknownHelper { id })
    }

    /// Small sphere at a picked point.
    pub fn draw_point_marker(&mut self, position: Vec3) -> HelperId {
        self.track(
            Primitive::Marker {
                position,
                radius: self.style.marker_radius,
            },
            None,
        )
    }

    /// Draw a segment. With a `chain`, also draw the arc between the previous
    /// segment and this one plus its angle label. Radius segments never chain.
    pub fn draw_line_segment(
        &mut self,
        start: Vec3,
        end: Vec3,
        style: SegmentStyle,
        chain: Option<&AngleChain>,
        formatter: &Formatter,
    ) -> Result<DrawnSegment, RenderError> {
        let thickness = match style {
            SegmentStyle::Edge => self.style.edge_thickness,
            SegmentStyle::Measurement | SegmentStyle::Radius => 0.0,
        };
        let line = self.track(
            Primitive::Segment {
                start,
                end,
                style,
                thickness,
            },
            None,
        );

        let angle = match chain {
            Some(chain) if !style.is_radius() => {
                self.draw_angle(chain, &Segment::new(start, end), formatter)?
            }
            _ => None,
        };

        Ok(DrawnSegment { line, angle })
    }

    fn draw_angle(
        &mut self,
        chain: &AngleChain,
        current: &Segment,
        formatter: &Formatter,
    ) -> Result<Option<DrawnAngle>, RenderError> {
        let geometry = match chain.measure {
            AngleMeasure::AtVertex => {
                angle_between_consecutive_segments(&chain.previous, current, &self.style.arc)
            }
            AngleMeasure::BetweenDirections => {
                angle_between_edge_directions(&chain.previous, current, &self.style.arc)
            }
        };
        let Some(geometry) = geometry else {
            return Ok(None);
        };
        let degrees = geometry.angle_degrees;

        let arc = self.track(
            Primitive::Arc {
                points: geometry.curve,
            },
            None,
        );
        let label = self.draw_label(
            geometry.curve_midpoint,
            formatter.angle_label(degrees),
            LabelKind::Angle,
            Some(chain.category()),
            Some(arc),
        )?;

        Ok(Some(DrawnAngle {
            arc,
            label,
            degrees,
        }))
    }

    /// Dashed line from a point on a circle to its centre.
    pub fn draw_radius_indicator(&mut self, edge_point: Vec3, center: Vec3) -> HelperId {
        self.track(
            Primitive::Segment {
                start: edge_point,
                end: center,
                style: SegmentStyle::Radius,
                thickness: 0.0,
            },
            None,
        )
    }

    /// Text label, optionally attached to the primitive it annotates.
    pub fn draw_label(
        &mut self,
        position: Vec3,
        text: String,
        kind: LabelKind,
        icon: Option<Category>,
        owner: Option<HelperId>,
    ) -> Result<HelperId, RenderError> {
        if let Some(owner) = owner {
            self.require(owner)?;
        }
        Ok(self.track(
            Primitive::Label {
                position,
                text,
                kind,
                icon,
            },
            owner,
        ))
    }

    /// Entry number shown `lift` above `anchor`.
    pub fn draw_index_label(
        &mut self,
        owner: HelperId,
        anchor: Vec3,
        number: u32,
        lift: f64,
    ) -> Result<HelperId, RenderError> {
        self.draw_label(
            anchor + Vec3::y() * lift,
            number.to_string(),
            LabelKind::PointIndex,
            None,
            Some(owner),
        )
    }

    /// Ids of `ids` plus the labels attached to them that `scope` reaches.
    fn with_labels(
        &self,
        ids: &[HelperId],
        scope: LabelScope,
    ) -> Result<Vec<HelperId>, RenderError> {
        let mut targets = Vec::new();
        for &id in ids {
            self.require(id)?;
            targets.push(id);
            targets.extend(self.helpers.iter().filter_map(|(label, r)| {
                let reached = r.owner == Some(id) && r.label_kind.is_some_and(|k| scope.includes(k));
                reached.then_some(*label)
            }));
        }
        Ok(targets)
    }

    pub fn set_visibility(
        &mut self,
        ids: &[HelperId],
        visible: bool,
        scope: LabelScope,
    ) -> Result<(), RenderError> {
        for id in self.with_labels(ids, scope)? {
            self.scene.set_visible(id, visible)?;
        }
        Ok(())
    }

    pub fn set_highlight(
        &mut self,
        ids: &[HelperId],
        on: bool,
        scope: LabelScope,
    ) -> Result<(), RenderError> {
        for id in self.with_labels(ids, scope)? {
            self.scene.set_highlighted(id, on)?;
        }
        Ok(())
    }

    /// Remove every helper from the scene. Returns how many were removed.
    ///
    /// Bookkeeping is emptied even if the scene reports an error; the first
    /// error is returned after every removal has been attempted.
    pub fn clear_all(&mut self) -> Result<usize, RenderError> {
        let helpers = std::mem::take(&mut self.helpers);
        let mut first_error = None;
        let mut removed = 0;
        for id in helpers.into_keys() {
            match self.scene.remove(id) {
                Ok(()) => removed += 1,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        debug!(removed, "helpers cleared");
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(removed),
        }
    }
}
