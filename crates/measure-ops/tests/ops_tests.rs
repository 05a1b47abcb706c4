use approx::assert_relative_eq;
use measure_ops::*;
use measure_types::*;
use proptest::prelude::*;

fn v(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

// ── Distance ─────────────────────────────────────────────────────────────

#[test]
fn distance_along_axis() {
    assert_relative_eq!(distance(&v(0.0, 0.0, 0.0), &v(10.0, 0.0, 0.0)), 10.0);
}

#[test]
fn distance_diagonal() {
    assert_relative_eq!(
        distance(&v(1.0, 2.0, 3.0), &v(4.0, 6.0, 3.0)),
        5.0,
        epsilon = 1e-12
    );
}

// ── Edge angles ──────────────────────────────────────────────────────────

#[test]
fn perpendicular_edges_are_ninety_degrees() {
    let a = Segment::new(v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0));
    let b = Segment::new(v(10.0, 0.0, 0.0), v(10.0, 10.0, 0.0));
    assert_relative_eq!(angle_between_edges(&a, &b), 90.0, epsilon = 1e-9);
}

#[test]
fn opposite_edges_are_one_eighty_degrees() {
    let a = Segment::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
    let b = Segment::new(v(5.0, 0.0, 0.0), v(2.0, 0.0, 0.0));
    assert_relative_eq!(angle_between_edges(&a, &b), 180.0, epsilon = 1e-9);
}

#[test]
fn degenerate_edge_angle_is_zero() {
    let a = Segment::new(v(1.0, 1.0, 1.0), v(1.0, 1.0, 1.0));
    let b = Segment::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
    assert_eq!(angle_between_edges(&a, &b), 0.0);
}

// ── Consecutive segments ─────────────────────────────────────────────────

#[test]
fn right_angle_corner_produces_arc() {
    let prev = Segment::new(v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0));
    let curr = Segment::new(v(10.0, 0.0, 0.0), v(10.0, 10.0, 0.0));
    let angle = angle_between_consecutive_segments(&prev, &curr, &ArcSettings::default())
        .expect("segments share a vertex");

    assert_relative_eq!(angle.angle_degrees, 90.0, epsilon = 1e-9);
    assert_relative_eq!(angle.vertex, v(10.0, 0.0, 0.0), epsilon = 1e-12);
    assert_eq!(angle.curve.len(), ArcSettings::default().segments + 1);

    // Arc radius is a quarter of the shorter arm (10 mm).
    for p in &angle.curve {
        assert_relative_eq!(distance(p, &angle.vertex), 2.5, epsilon = 1e-9);
    }

    // Midpoint bisects the corner, pointing back-left-up from (10,0,0).
    let bisector = (angle.curve_midpoint - angle.vertex).normalize();
    let expected = v(-1.0, 1.0, 0.0).normalize();
    assert_relative_eq!(bisector, expected, epsilon = 1e-9);
}

#[test]
fn vertex_angle_differs_from_direction_angle_for_acute_turn() {
    // Walk right, then back up-left at 45 degrees.
    let prev = Segment::new(v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0));
    let curr = Segment::new(v(10.0, 0.0, 0.0), v(0.0, 10.0, 0.0));
    let at_vertex = angle_between_consecutive_segments(&prev, &curr, &ArcSettings::default())
        .unwrap()
        .angle_degrees;

    assert_relative_eq!(at_vertex, 45.0, epsilon = 1e-9);
    assert_relative_eq!(angle_between_edges(&prev, &curr), 135.0, epsilon = 1e-9);
}

#[test]
fn approximate_vertex_uses_closest_endpoints() {
    let prev = Segment::new(v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0));
    // Starts 0.2 mm off the end of prev.
    let curr = Segment::new(v(10.0, 0.2, 0.0), v(10.0, 10.0, 0.0));
    let angle =
        angle_between_consecutive_segments(&prev, &curr, &ArcSettings::default()).unwrap();
    assert_relative_eq!(angle.vertex, v(10.0, 0.1, 0.0), epsilon = 1e-12);
}

#[test]
fn reversed_segments_still_find_vertex() {
    let prev = Segment::new(v(10.0, 0.0, 0.0), v(0.0, 0.0, 0.0));
    let curr = Segment::new(v(0.0, 10.0, 0.0), v(0.0, 0.0, 0.0));
    let angle =
        angle_between_consecutive_segments(&prev, &curr, &ArcSettings::default()).unwrap();
    assert_relative_eq!(angle.vertex, v(0.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(angle.angle_degrees, 90.0, epsilon = 1e-9);
}

#[test]
fn straight_continuation_is_one_eighty() {
    let prev = Segment::new(v(0.0, 0.0, 0.0), v(5.0, 0.0, 0.0));
    let curr = Segment::new(v(5.0, 0.0, 0.0), v(9.0, 0.0, 0.0));
    let angle =
        angle_between_consecutive_segments(&prev, &curr, &ArcSettings::default()).unwrap();
    assert_relative_eq!(angle.angle_degrees, 180.0, epsilon = 1e-9);
    // Half-turn arc midpoint sits off the line.
    assert!(angle.curve_midpoint.y.abs() + angle.curve_midpoint.z.abs() > 0.5);
}

#[test]
fn degenerate_segment_produces_no_angle() {
    let prev = Segment::new(v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0));
    let curr = Segment::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
    assert!(angle_between_consecutive_segments(&prev, &curr, &ArcSettings::default()).is_none());
}

#[test]
fn direction_arc_spans_the_direction_angle() {
    let prev = Segment::new(v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0));
    let curr = Segment::new(v(10.0, 0.0, 0.0), v(20.0, 10.0, 0.0));
    let angle =
        angle_between_edge_directions(&prev, &curr, &ArcSettings::default()).unwrap();

    assert_relative_eq!(angle.angle_degrees, 45.0, epsilon = 1e-9);
    assert_relative_eq!(angle.vertex, v(10.0, 0.0, 0.0), epsilon = 1e-12);

    // Starts on the continuation of prev, ends along curr.
    let first = angle.curve[0] - angle.vertex;
    let last = angle.curve[angle.curve.len() - 1] - angle.vertex;
    assert_relative_eq!(first, v(2.5, 0.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(first.angle(&last).to_degrees(), 45.0, epsilon = 1e-9);
    assert_relative_eq!(last.angle(&curr.direction()), 0.0, epsilon = 1e-9);
}

#[test]
fn direction_arc_skips_degenerate_edges() {
    let prev = Segment::new(v(1.0, 1.0, 0.0), v(1.0, 1.0, 0.0));
    let curr = Segment::new(v(1.0, 1.0, 0.0), v(2.0, 1.0, 0.0));
    assert!(angle_between_edge_directions(&prev, &curr, &ArcSettings::default()).is_none());
}

// ── Units & formatting ───────────────────────────────────────────────────

#[test]
fn inches_divide_by_25_4() {
    let c = UnitConverter::new(LengthUnit::Inches, AngleUnit::Degrees);
    assert_relative_eq!(c.to_display_length(25.4), 1.0);
    assert_relative_eq!(c.to_display_length(127.0), 5.0, epsilon = 1e-12);
}

#[test]
fn millimetres_are_identity() {
    let c = UnitConverter::default();
    assert_eq!(c.to_display_length(12.5), 12.5);
    assert_eq!(c.to_display_angle(30.0), 30.0);
}

#[test]
fn radians_convert_from_degrees() {
    let c = UnitConverter::new(LengthUnit::Millimeters, AngleUnit::Radians);
    assert_relative_eq!(c.to_display_angle(180.0), std::f64::consts::PI);
}

#[test]
fn length_label_millimetres() {
    let f = Formatter::default();
    assert_eq!(f.length_label(10.0), "10.00 mm");
}

#[test]
fn length_label_inches() {
    let f = Formatter::new(
        UnitConverter::new(LengthUnit::Inches, AngleUnit::Degrees),
        DisplaySettings::default(),
    );
    assert_eq!(f.length_label(25.4), "1.00 in");
}

#[test]
fn angle_labels() {
    let deg = Formatter::default();
    assert_eq!(deg.angle_label(90.0), "90.00\u{00B0}");

    let rad = Formatter::new(
        UnitConverter::new(LengthUnit::Millimeters, AngleUnit::Radians),
        DisplaySettings::default(),
    );
    assert_eq!(rad.angle_label(90.0), "1.57 rad");
}

#[test]
fn decimal_places_are_respected() {
    let f = Formatter::new(UnitConverter::default(), DisplaySettings { decimal_places: 3 });
    assert_eq!(f.length_label(1.0 / 3.0), "0.333 mm");
    assert_eq!(f.row_text("Distance", 2.0, "mm"), "Distance: 2.000 mm");
}

#[test]
fn huge_precision_is_capped() {
    let text = format_fixed(1.5, 70_000);
    assert_eq!(text, format_fixed(1.5, MAX_DECIMAL_PLACES));
    assert_eq!(text.len(), 2 + MAX_DECIMAL_PLACES);
}

#[test]
fn coordinate_text_format() {
    let f = Formatter::default();
    assert_eq!(
        f.coordinate_text(3, &v(1.0, -2.5, 0.0)),
        "3: X 1.00, Y -2.50, Z 0.00"
    );
}

// ── Properties ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn edge_angle_in_range(
        (ax, ay, az) in (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0),
        (bx, by, bz) in (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0),
    ) {
        let a = Segment::new(Vec3::zeros(), v(ax, ay, az));
        let b = Segment::new(Vec3::zeros(), v(bx, by, bz));
        let angle = angle_between_edges(&a, &b);
        prop_assert!((0.0..=180.0).contains(&angle), "angle {} out of range", angle);
    }

    #[test]
    fn inch_round_trip(mm in 0.0f64..10_000.0) {
        let inches = UnitConverter::new(LengthUnit::Inches, AngleUnit::Degrees);
        prop_assert!((inches.to_display_length(mm) * MM_PER_INCH - mm).abs() < 1e-9);
    }
}
