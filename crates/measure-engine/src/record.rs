//! The recording path shared by fresh picks and replay.
//!
//! Nothing here touches history: callers snapshot before recording a fresh
//! pick, and replay records without snapshots.

use tracing::debug;

use measure_ops::{angle_between_edges, distance, Segment};
use measure_types::{
    Category, EdgeEntry, EdgePick, Entry, HelperId, LabelKind, LabelScope, PointEntry, PointPick,
    SegmentStyle, SequenceNumber, SourceMeta, Vec3,
};
use scene_port::Scene;

use crate::annotation::{AngleChain, AngleMeasure};
use crate::types::{EngineError, MeasurementRow, RowCoordinate};
use crate::MeasurementEngine;

/// A row before formatting. `value` is canonical (millimetres or degrees).
struct RowDraft {
    category: Category,
    value: f64,
    entries: Vec<SequenceNumber>,
    helpers: Vec<HelperId>,
    coordinates: Vec<(SequenceNumber, Vec3)>,
    label_scope: LabelScope,
}

/// A previously stored edge resolved to world space.
struct PlacedEdge {
    number: SequenceNumber,
    line: HelperId,
    segment: Segment,
}

impl<S: Scene> MeasurementEngine<S> {
    pub(crate) fn record_entry(&mut self, entry: &Entry) -> Result<SequenceNumber, EngineError> {
        match entry {
            Entry::Point(p) => self.record_point(&p.pick, p.source),
            Entry::Edge(e) => self.record_edge(&e.pick, e.source),
        }
    }

    /// Marker, optional radius indicator, index label, then the distance to
    /// the previous point. A third point in a row also gets the vertex angle.
    pub(crate) fn record_point(
        &mut self,
        pick: &PointPick,
        source: SourceMeta,
    ) -> Result<SequenceNumber, EngineError> {
        let center = pick.center;
        let marker = self.renderer.draw_point_marker(center);
        let number = self.store.append(Entry::Point(PointEntry {
            number: 0,
            center,
            source,
            pick: pick.clone(),
            label_helper: marker,
        }));

        if let Some(radius) = &pick.radius {
            let edge_point = self
                .renderer
                .scene()
                .local_to_world(source.edge_object(), radius.edge_start);
            let line = self.renderer.draw_radius_indicator(edge_point, center);
            self.renderer.draw_label(
                (edge_point + center) * 0.5,
                self.formatter.length_label(radius.radius),
                LabelKind::Length,
                Some(Category::Radius),
                Some(line),
            )?;
            self.push_row(RowDraft {
                category: Category::Radius,
                value: radius.radius,
                entries: vec![number],
                helpers: vec![line],
                coordinates: vec![(number, center)],
                label_scope: LabelScope::All,
            });
        }

        let lift = self.renderer.style().index_label_lift;
        self.renderer
            .draw_index_label(marker, center, number, lift)?;

        let recent: Vec<(SequenceNumber, Vec3)> = self
            .store
            .last_points(3)
            .into_iter()
            .map(|p| (p.number, p.center))
            .collect();
        if let [.., prev, curr] = recent.as_slice() {
            let (prev, curr) = (*prev, *curr);
            let chain = match recent.as_slice() {
                [first, _, _] => Some(AngleChain {
                    previous: Segment::new(first.1, prev.1),
                    measure: AngleMeasure::AtVertex,
                }),
                _ => None,
            };

            let formatter = self.formatter;
            let drawn = self.renderer.draw_line_segment(
                prev.1,
                curr.1,
                SegmentStyle::Measurement,
                chain.as_ref(),
                &formatter,
            )?;

            if let Some(angle) = drawn.angle {
                self.push_row(RowDraft {
                    category: Category::Angle,
                    value: angle.degrees,
                    entries: recent.iter().map(|(n, _)| *n).collect(),
                    helpers: vec![angle.arc],
                    coordinates: recent.clone(),
                    label_scope: LabelScope::All,
                });
            }

            let length = distance(&prev.1, &curr.1);
            self.renderer.draw_label(
                (prev.1 + curr.1) * 0.5,
                formatter.length_label(length),
                LabelKind::Length,
                Some(Category::Coordinates),
                Some(drawn.line),
            )?;
            self.push_row(RowDraft {
                category: Category::Points,
                value: length,
                entries: vec![prev.0, curr.0],
                helpers: vec![drawn.line],
                coordinates: vec![prev, curr],
                label_scope: LabelScope::All,
            });
        }

        debug!(number, "point recorded");
        Ok(number)
    }

    /// Edge line chained to the previous edge, its rows, length label and
    /// index label.
    pub(crate) fn record_edge(
        &mut self,
        pick: &EdgePick,
        source: SourceMeta,
    ) -> Result<SequenceNumber, EngineError> {
        let owner = source.edge_object();
        let segment = {
            let scene = self.renderer.scene();
            Segment::new(
                scene.local_to_world(owner, pick.start),
                scene.local_to_world(owner, pick.end),
            )
        };

        let previous = self.store.last_edge().map(|e| {
            let scene = self.renderer.scene();
            let object = e.source.edge_object();
            PlacedEdge {
                number: e.number,
                line: e.label_helper,
                segment: Segment::new(
                    scene.local_to_world(object, e.start),
                    scene.local_to_world(object, e.end),
                ),
            }
        });
        let chain = previous.as_ref().map(|p| AngleChain {
            previous: p.segment,
            measure: AngleMeasure::BetweenDirections,
        });

        let formatter = self.formatter;
        let drawn = self.renderer.draw_line_segment(
            segment.start,
            segment.end,
            SegmentStyle::Edge,
            chain.as_ref(),
            &formatter,
        )?;
        let number = self.store.append(Entry::Edge(EdgeEntry {
            number: 0,
            start: pick.start,
            end: pick.end,
            source,
            pick: pick.clone(),
            label_helper: drawn.line,
        }));

        self.push_row(RowDraft {
            category: Category::Edge,
            value: pick.length,
            entries: vec![number],
            helpers: vec![drawn.line],
            coordinates: vec![(number, segment.start), (number, segment.end)],
            label_scope: LabelScope::LengthOnly,
        });

        if let Some(prev) = &previous {
            let degrees = match drawn.angle {
                Some(angle) => angle.degrees,
                None => angle_between_edges(&prev.segment, &segment),
            };
            let mut helpers: Vec<HelperId> = drawn.angle.map(|a| a.arc).into_iter().collect();
            helpers.extend([drawn.line, prev.line]);
            self.push_row(RowDraft {
                category: Category::EdgeAngle,
                value: degrees,
                entries: vec![prev.number, number],
                helpers,
                coordinates: vec![
                    (prev.number, prev.segment.start),
                    (prev.number, prev.segment.end),
                    (number, segment.start),
                    (number, segment.end),
                ],
                label_scope: LabelScope::LengthOnly,
            });
        }

        let midpoint = segment.midpoint();
        self.renderer.draw_label(
            midpoint,
            formatter.length_label(pick.length),
            LabelKind::Length,
            Some(Category::Edge),
            Some(drawn.line),
        )?;
        let style = self.renderer.style();
        let lift = style.index_label_lift + style.edge_index_lift;
        self.renderer
            .draw_index_label(drawn.line, midpoint, number, lift)?;

        debug!(number, "edge recorded");
        Ok(number)
    }

    fn push_row(&mut self, draft: RowDraft) {
        let f = &self.formatter;
        let (value, unit) = if draft.category.is_angle() {
            (f.angle_value(draft.value), f.units.angle.suffix())
        } else {
            (f.length_value(draft.value), f.units.length.suffix())
        };
        let coordinates = draft
            .coordinates
            .into_iter()
            .map(|(number, position)| RowCoordinate {
                number,
                position,
                text: f.coordinate_text(number, &position),
            })
            .collect();

        self.rows.push(MeasurementRow {
            category: draft.category,
            value,
            unit: unit.to_string(),
            text: f.row_text(draft.category.title(), value, unit),
            entries: draft.entries,
            helpers: draft.helpers,
            coordinates,
            can_toggle_visibility: draft.category != Category::EdgeAngle,
            label_scope: draft.label_scope,
        });
    }
}
