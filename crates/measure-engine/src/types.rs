use serde::{Deserialize, Serialize};

use measure_types::{
    Category, EdgeEntry, HelperId, LabelScope, PointEntry, SequenceNumber, Vec3,
};

use crate::annotation::RenderError;
use crate::config::ConfigError;

/// A structural copy of the store's entries at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub points: Vec<PointEntry>,
    pub edges: Vec<EdgeEntry>,
}

impl HistorySnapshot {
    pub fn len(&self) -> usize {
        self.points.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All sequence numbers, sorted.
    pub fn numbers(&self) -> Vec<SequenceNumber> {
        let mut numbers: Vec<_> = self
            .points
            .iter()
            .map(|p| p.number)
            .chain(self.edges.iter().map(|e| e.number))
            .collect();
        numbers.sort_unstable();
        numbers
    }

    /// Copy of this snapshot with the entry numbered `number` left out.
    /// Survivors keep their original numbers until replay compacts them.
    pub fn without(&self, number: SequenceNumber) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|p| p.number != number)
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| e.number != number)
                .cloned()
                .collect(),
        }
    }
}

/// Which history stack an operation needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryStack {
    Past,
    Future,
}

/// Lifecycle of a measurement tool session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolState {
    #[default]
    Closed,
    Open,
}

/// What `record_selection` did with a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordOutcome {
    /// A new entry was stored under this number.
    Recorded(SequenceNumber),
    /// The same geometry on the same object is already stored.
    Duplicate,
}

/// One coordinate line in a row's detail block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowCoordinate {
    pub number: SequenceNumber,
    pub position: Vec3,
    /// `"2: X 10.00, Y 0.00, Z 0.00"`
    pub text: String,
}

/// A derived measurement as the list panel displays it.
///
/// The panel keeps no measurement state of its own: delete requests come back
/// keyed by entry number, visibility and hover requests keyed by `helpers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub category: Category,
    /// Value in the current display unit.
    pub value: f64,
    /// Unit suffix for `value`.
    pub unit: String,
    /// `"Distance: 10.00 mm"`
    pub text: String,
    /// Entries the measurement is derived from, oldest first.
    pub entries: Vec<SequenceNumber>,
    /// Primitives that represent this measurement in the scene.
    pub helpers: Vec<HelperId>,
    pub coordinates: Vec<RowCoordinate>,
    /// Edge-angle rows have no visibility toggle.
    pub can_toggle_visibility: bool,
    /// Labels reached by the row's visibility toggle and hover highlight.
    pub label_scope: LabelScope,
}

/// Errors from the measurement engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("history stack is empty: {stack:?}")]
    EmptyHistory { stack: HistoryStack },

    #[error("no entry numbered {number}")]
    EntryNotFound { number: SequenceNumber },

    #[error("unsupported number of decimal places: {places} (at most {max})", max = measure_ops::MAX_DECIMAL_PLACES)]
    InvalidPrecision { places: usize },

    #[error("measurement tool is closed")]
    ToolClosed,

    #[error("invariant violated: {reason}")]
    InvariantViolation { reason: String },

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
