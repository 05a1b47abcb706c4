use measure_types::{EdgeEntry, Entry, ObjectId, PointEntry, SequenceNumber, Vec3};

use crate::history::History;
use crate::types::{EngineError, HistorySnapshot};

/// The ordered ledger of point and edge entries plus its snapshot history.
///
/// Points and edges share one numbering space: the numbers over all entries
/// are always exactly `1..=len()`.
#[derive(Debug, Default)]
pub struct MeasurementStore {
    entries: Vec<Entry>,
    history: History,
}

impl MeasurementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry under the next free number and return that number.
    /// Whatever number the entry carried is replaced.
    pub fn append(&mut self, entry: Entry) -> SequenceNumber {
        let number = self.entries.len() as SequenceNumber + 1;
        self.entries.push(entry.renumbered(number));
        number
    }

    /// Every entry in creation order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn points(&self) -> impl Iterator<Item = &PointEntry> {
        self.entries.iter().filter_map(Entry::as_point)
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeEntry> {
        self.entries.iter().filter_map(Entry::as_edge)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.points().count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    pub fn find(&self, number: SequenceNumber) -> Option<&Entry> {
        self.entries.iter().find(|e| e.number() == number)
    }

    pub fn contains(&self, number: SequenceNumber) -> bool {
        self.find(number).is_some()
    }

    /// Whether a point with this centre was already picked on `part`.
    pub fn contains_point(&self, part: ObjectId, center: &Vec3) -> bool {
        self.points()
            .any(|p| p.source.part == part && p.center == *center)
    }

    /// Whether this edge of `owner` was already picked.
    pub fn contains_edge(&self, owner: ObjectId, start: &Vec3, end: &Vec3) -> bool {
        self.edges().any(|e| {
            e.source.edge_object() == owner && e.start == *start && e.end == *end
        })
    }

    /// The newest `n` points, oldest first. Shorter when fewer exist.
    pub fn last_points(&self, n: usize) -> Vec<&PointEntry> {
        let points: Vec<_> = self.points().collect();
        let skip = points.len().saturating_sub(n);
        points.into_iter().skip(skip).collect()
    }

    /// The newest edge.
    pub fn last_edge(&self) -> Option<&EdgeEntry> {
        self.entries.iter().rev().find_map(Entry::as_edge)
    }

    /// Structural copy of the current entries.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            points: self.points().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }

    pub fn snapshot_to_past(&mut self) {
        let snapshot = self.snapshot();
        self.history.push_past(snapshot);
    }

    pub fn snapshot_to_future(&mut self) {
        let snapshot = self.snapshot();
        self.history.push_future(snapshot);
    }

    /// Put a previously popped snapshot back on the past stack.
    pub fn push_past(&mut self, snapshot: HistorySnapshot) {
        self.history.push_past(snapshot);
    }

    /// Put a previously popped snapshot back on the future stack.
    pub fn push_future(&mut self, snapshot: HistorySnapshot) {
        self.history.push_future(snapshot);
    }

    pub fn pop_past(&mut self) -> Result<HistorySnapshot, EngineError> {
        self.history.pop_past()
    }

    pub fn pop_future(&mut self) -> Result<HistorySnapshot, EngineError> {
        self.history.pop_future()
    }

    /// Drop the redo stack after a fresh user mutation.
    pub fn clear_future(&mut self) {
        self.history.clear_future();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Empty the ledger. History is untouched.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Verify the numbers over all entries are exactly `1..=len()`.
    pub fn check_numbering(&self) -> Result<(), EngineError> {
        let mut numbers: Vec<_> = self.entries.iter().map(Entry::number).collect();
        numbers.sort_unstable();
        for (i, number) in numbers.iter().enumerate() {
            let expected = i as SequenceNumber + 1;
            if *number != expected {
                return Err(EngineError::InvariantViolation {
                    reason: format!(
                        "entry numbers {:?} are not 1..={}",
                        numbers,
                        numbers.len()
                    ),
                });
            }
        }
        Ok(())
    }
}
