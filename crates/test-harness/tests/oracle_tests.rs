//! Tests for verification oracles.

use measure_types::HelperKind;
use scene_port::Scene;
use test_harness::helpers::*;
use test_harness::oracle::*;
use test_harness::SessionBuilder;

/// A session with a point chain, two chained edges and a circle.
fn build_mixed_session() -> SessionBuilder {
    let mut s = SessionBuilder::new();
    s.add_part("block").unwrap();
    s.points(
        "block",
        &[v(0.0, 0.0, 0.0), v(5.0, 0.0, 0.0), v(5.0, 5.0, 0.0)],
    )
    .unwrap();
    s.edge("block", v(0.0, 10.0, 0.0), v(8.0, 10.0, 0.0)).unwrap();
    s.edge("block", v(8.0, 10.0, 0.0), v(8.0, 20.0, 0.0)).unwrap();
    s.circle("block", v(30.0, 0.0, 0.0), 3.0).unwrap();
    s
}

// ── Ledger Oracle Tests ─────────────────────────────────────────────────

#[test]
fn numbering_passes_for_mixed_session() {
    let s = build_mixed_session();
    let result = check_numbering(s.engine());
    assert!(result.passed, "numbering should be contiguous: {}", result.detail);
    assert_eq!(result.detail, "6 entries");
}

#[test]
fn index_labels_pass_for_mixed_session() {
    let s = build_mixed_session();
    let result = check_index_labels(s.engine());
    assert!(result.passed, "one index label per entry: {}", result.detail);
}

#[test]
fn markers_match_points() {
    let s = build_mixed_session();
    let result = check_markers(s.engine());
    assert!(result.passed, "{}", result.detail);
    assert_eq!(s.scene().count(HelperKind::Marker), 4);
}

#[test]
fn oracles_pass_on_empty_session() {
    let s = SessionBuilder::new();
    for verdict in run_all_checks(s.engine()) {
        assert!(verdict.passed, "{}: {}", verdict.oracle_name, verdict.detail);
    }
}

// ── Scene Oracle Tests ──────────────────────────────────────────────────

#[test]
fn bookkeeping_passes_after_rebuilds() {
    let mut s = build_mixed_session();
    s.delete(2).unwrap();
    s.undo().unwrap();
    s.redo().unwrap();

    let result = check_helper_bookkeeping(s.engine());
    assert!(result.passed, "{}", result.detail);
    let result = check_label_owners(s.engine());
    assert!(result.passed, "{}", result.detail);
}

#[test]
fn bookkeeping_detects_helper_removed_behind_engine() {
    let mut s = build_mixed_session();
    let marker = s.engine().store().points().next().unwrap().label_helper;
    s.session.engine.scene_mut().remove(marker).unwrap();

    let result = check_helper_bookkeeping(s.engine());
    assert!(!result.passed);
    assert!(result.detail.contains("missing from scene"), "{}", result.detail);

    let markers = check_markers(s.engine());
    assert!(!markers.passed, "marker count should no longer match");
}

#[test]
fn bookkeeping_detects_untracked_helper() {
    let mut s = build_mixed_session();
    s.session
        .engine
        .scene_mut()
        .add(scene_port::Primitive::Marker {
            position: v(1.0, 1.0, 1.0),
            radius: 0.5,
        });

    let result = check_helper_bookkeeping(s.engine());
    assert!(!result.passed);
    assert!(result.detail.contains("untracked in scene"), "{}", result.detail);
}

// ── Row Oracle Tests ────────────────────────────────────────────────────

#[test]
fn rows_reference_live_entries() {
    let s = build_mixed_session();
    let result = check_rows(s.engine());
    assert!(result.passed, "{}", result.detail);
    assert_eq!(result.detail, format!("{} rows", s.rows().len()));
}

#[test]
fn check_reports_first_failing_oracle() {
    let mut s = build_mixed_session();
    let line = s.engine().store().edges().next().unwrap().label_helper;
    s.session.engine.scene_mut().remove(line).unwrap();

    match s.check() {
        Err(test_harness::HarnessError::OracleFailure { oracle, .. }) => {
            assert_eq!(oracle, "helper_bookkeeping");
        }
        other => panic!("expected an oracle failure, got {:?}", other),
    }
}
