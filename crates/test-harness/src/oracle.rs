//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures in one pass.

use measure_engine::MeasurementEngine;
use measure_types::{HelperKind, LabelKind};
use scene_port::MockScene;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
        }
    }
}

type Engine = MeasurementEngine<MockScene>;

// ── Ledger Oracles ──────────────────────────────────────────────────────────

/// Entry numbers are exactly `1..=N`.
pub fn check_numbering(engine: &Engine) -> OracleVerdict {
    const NAME: &str = "numbering";
    match engine.store().check_numbering() {
        Ok(()) => OracleVerdict::pass(NAME, format!("{} entries", engine.store().len())),
        Err(e) => OracleVerdict::fail(NAME, e.to_string()),
    }
}

/// One index label per entry, reading `1..=N`.
pub fn check_index_labels(engine: &Engine) -> OracleVerdict {
    const NAME: &str = "index_labels";
    let mut labels = engine.scene().label_texts(LabelKind::PointIndex);
    labels.sort_by_key(|t| t.parse::<u32>().unwrap_or(u32::MAX));
    let expected: Vec<String> = (1..=engine.store().len()).map(|n| n.to_string()).collect();
    if labels == expected {
        OracleVerdict::pass(NAME, format!("{} index labels", labels.len()))
    } else {
        OracleVerdict::fail(NAME, format!("expected {:?}, got {:?}", expected, labels))
    }
}

/// One marker per stored point.
pub fn check_markers(engine: &Engine) -> OracleVerdict {
    const NAME: &str = "markers";
    let markers = engine.scene().count(HelperKind::Marker);
    let points = engine.store().point_count();
    if markers == points {
        OracleVerdict::pass(NAME, format!("{} markers", markers))
    } else {
        OracleVerdict::fail(NAME, format!("{} markers for {} points", markers, points))
    }
}

// ── Scene Oracles ───────────────────────────────────────────────────────────

/// The renderer tracks exactly what the scene holds.
pub fn check_helper_bookkeeping(engine: &Engine) -> OracleVerdict {
    const NAME: &str = "helper_bookkeeping";
    let scene = engine.scene();
    let tracked = engine.renderer().helpers();
    let untracked: Vec<_> = scene
        .nodes()
        .map(|(id, _)| id)
        .filter(|id| !tracked.contains_key(id))
        .collect();
    let missing: Vec<_> = tracked
        .keys()
        .filter(|id| scene.node(**id).is_none())
        .collect();

    if untracked.is_empty() && missing.is_empty() {
        OracleVerdict::pass(NAME, format!("{} helpers", tracked.len()))
    } else {
        OracleVerdict::fail(
            NAME,
            format!("untracked in scene: {:?}, missing from scene: {:?}", untracked, missing),
        )
    }
}

/// Every label's owner is a live helper.
pub fn check_label_owners(engine: &Engine) -> OracleVerdict {
    const NAME: &str = "label_owners";
    let helpers = engine.renderer().helpers();
    let orphans: Vec<_> = helpers
        .iter()
        .filter_map(|(id, r)| r.owner.filter(|o| !helpers.contains_key(o)).map(|_| *id))
        .collect();
    if orphans.is_empty() {
        OracleVerdict::pass(NAME, "all label owners live".into())
    } else {
        OracleVerdict::fail(NAME, format!("labels with dead owners: {:?}", orphans))
    }
}

// ── Row Oracles ─────────────────────────────────────────────────────────────

/// Every row references stored entries and live helpers.
pub fn check_rows(engine: &Engine) -> OracleVerdict {
    const NAME: &str = "rows";
    for (i, row) in engine.rows().iter().enumerate() {
        if let Some(n) = row.entries.iter().find(|n| !engine.store().contains(**n)) {
            return OracleVerdict::fail(NAME, format!("row {} references entry {}", i, n));
        }
        if let Some(h) = row
            .helpers
            .iter()
            .find(|h| engine.renderer().helper(**h).is_none())
        {
            return OracleVerdict::fail(NAME, format!("row {} references helper {}", i, h));
        }
    }
    OracleVerdict::pass(NAME, format!("{} rows", engine.rows().len()))
}

// ── Composite ───────────────────────────────────────────────────────────────

/// Run every check on an engine.
pub fn run_all_checks(engine: &Engine) -> Vec<OracleVerdict> {
    vec![
        check_numbering(engine),
        check_index_labels(engine),
        check_markers(engine),
        check_helper_bookkeeping(engine),
        check_label_owners(engine),
        check_rows(engine),
    ]
}
