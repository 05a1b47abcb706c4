use tracing::debug;

use measure_types::{EdgeEntry, Entry, PointEntry};
use scene_port::Scene;

use crate::types::{EngineError, HistorySnapshot};
use crate::MeasurementEngine;

/// Interleave points and edges back into creation order.
///
/// Each list is first ordered by number (stable), then the two are merged
/// with a two-pointer walk. On equal numbers the edge goes first.
pub fn merge_by_number(mut points: Vec<PointEntry>, mut edges: Vec<EdgeEntry>) -> Vec<Entry> {
    points.sort_by_key(|p| p.number);
    edges.sort_by_key(|e| e.number);

    let mut merged = Vec::with_capacity(points.len() + edges.len());
    let mut points = points.into_iter().peekable();
    let mut edges = edges.into_iter().peekable();

    loop {
        let take_point = match (points.peek(), edges.peek()) {
            (Some(p), Some(e)) => p.number < e.number,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_point {
            points.next().map(Entry::Point)
        } else {
            edges.next().map(Entry::Edge)
        };
        merged.extend(next);
    }

    merged
}

impl<S: Scene> MeasurementEngine<S> {
    /// Remove every helper and row and empty the ledger. History is untouched.
    pub(crate) fn clear_visuals(&mut self) -> Result<(), EngineError> {
        self.store.reset();
        self.rows.clear();
        self.renderer.clear_all()?;
        Ok(())
    }

    /// Clear everything and re-run the recording path for each entry of
    /// `snapshot` in number order. Survivors are renumbered `1..=N`.
    pub(crate) fn rebuild(&mut self, snapshot: HistorySnapshot) -> Result<(), EngineError> {
        self.clear_visuals()?;
        let entries = merge_by_number(snapshot.points, snapshot.edges);
        debug!(count = entries.len(), "replaying entries");
        for entry in &entries {
            self.record_entry(entry)?;
        }
        self.store.check_numbering()
    }
}
