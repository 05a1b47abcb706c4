//! Tests for the SessionBuilder workflow API.

use measure_engine::config::MeasureConfig;
use measure_types::{Category, LengthUnit};
use test_harness::helpers::*;
use test_harness::{HarnessError, SessionBuilder};

#[test]
fn point_pick_records_entry() {
    let mut s = SessionBuilder::new();
    s.add_part("block").unwrap();
    s.point("block", v(0.0, 0.0, 0.0)).unwrap();
    assert_eq!(s.entry_count(), 1);
    assert!(s.rows().is_empty());
}

#[test]
fn named_lookup_returns_registered_id() {
    let mut s = SessionBuilder::new();
    let a = s.add_part("a").unwrap();
    let b = s.add_part("b").unwrap();
    assert_ne!(a, b);
    assert_eq!(s.part_id("a").unwrap(), a);
    assert_eq!(s.part_id("b").unwrap(), b);
}

#[test]
fn unknown_part_is_an_error() {
    let mut s = SessionBuilder::new();
    let err = s.point("nope", v(0.0, 0.0, 0.0)).err().unwrap();
    assert!(matches!(err, HarnessError::PartNotFound { .. }));
}

#[test]
fn duplicate_part_name_rejected() {
    let mut s = SessionBuilder::new();
    s.add_part("block").unwrap();
    let err = s.add_part("block").unwrap_err();
    assert!(matches!(err, HarnessError::DuplicateName { .. }));
}

#[test]
fn chained_picks() {
    let mut s = SessionBuilder::new();
    s.add_part("block").unwrap();
    s.point("block", v(0.0, 0.0, 0.0))
        .unwrap()
        .point("block", v(0.0, 7.0, 0.0))
        .unwrap()
        .undo()
        .unwrap();
    assert_eq!(s.entry_count(), 1);
}

#[test]
fn duplicate_pick_is_not_an_error() {
    let mut s = SessionBuilder::new();
    s.add_part("block").unwrap();
    s.point("block", v(1.0, 1.0, 1.0)).unwrap();
    s.point("block", v(1.0, 1.0, 1.0)).unwrap();
    assert_eq!(s.entry_count(), 1);
}

#[test]
fn engine_errors_surface_as_dispatch_errors() {
    let mut s = SessionBuilder::new();
    let err = s.undo().err().unwrap();
    assert!(matches!(err, HarnessError::DispatchError { .. }));

    let err = s.delete(4).err().unwrap();
    match err {
        HarnessError::DispatchError { message } => assert!(message.contains('4'), "{}", message),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn history_log_records_outcomes() {
    let mut s = SessionBuilder::new();
    s.add_part("block").unwrap();
    s.points("block", &[v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0)])
        .unwrap();
    let _ = s.redo();

    let log = s.history();
    assert_eq!(log[0], ("Open".to_string(), "ListUpdated(0 rows)".to_string()));
    assert_eq!(log[2].1, "ListUpdated(1 rows)");
    assert_eq!(log.last().unwrap().0, "Redo");
    assert!(log.last().unwrap().1.starts_with("Error("));
}

#[test]
fn config_sets_initial_units() {
    let config = MeasureConfig {
        length_unit: LengthUnit::Inches,
        ..MeasureConfig::default()
    };
    let mut s = SessionBuilder::with_config(config);
    s.add_part("block").unwrap();
    s.points("block", &[v(0.0, 0.0, 0.0), v(50.8, 0.0, 0.0)])
        .unwrap();
    assert_eq!(s.row_texts(), vec!["Distance: 2.00 in"]);
}

#[test]
fn rows_of_filters_by_category() {
    let mut s = SessionBuilder::new();
    s.add_part("block").unwrap();
    s.circle("block", v(0.0, 0.0, 0.0), 1.0).unwrap();
    s.point("block", v(4.0, 0.0, 0.0)).unwrap();
    assert_eq!(s.rows_of(Category::Radius).len(), 1);
    assert_eq!(s.rows_of(Category::Points).len(), 1);
    assert!(s.rows_of(Category::Edge).is_empty());
}

#[test]
fn auto_check_runs_after_each_step() {
    let mut s = SessionBuilder::new().with_auto_check();
    s.add_part("block").unwrap();
    for (a, b) in rect_edges(v(0.0, 0.0, 0.0), 3.0, 3.0) {
        s.edge("block", a, b).unwrap();
    }
    s.delete(2).unwrap();
    s.undo().unwrap();
    assert_eq!(s.entry_count(), 4);
}
