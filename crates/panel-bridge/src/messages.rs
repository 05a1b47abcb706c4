use serde::{Deserialize, Serialize};

use measure_engine::types::MeasurementRow;
use measure_types::{AngleUnit, LengthUnit, Selection, SequenceNumber, SourceMeta};

/// Messages from the list panel (and the picker) to the engine.
/// Serialized as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PanelToEngine {
    // -- Lifecycle --
    Open,
    Close,

    // -- Picking --
    /// The picker resolved a click to a point or edge.
    Select {
        selection: Selection,
        source: SourceMeta,
    },

    // -- List actions --
    /// Delete button on a coordinate line.
    DeleteEntry { number: SequenceNumber },
    /// Eye icon on a row.
    ToggleRowVisibility { row: usize, visible: bool },
    /// Mouse entered or left a row.
    HoverRow { row: usize, on: bool },
    /// Mouse entered or left a coordinate line.
    HoverEntry { number: SequenceNumber, on: bool },
    Reset,

    // -- History --
    Undo,
    Redo,

    // -- Preferences --
    SetLengthUnit { unit: LengthUnit },
    SetAngleUnit { unit: AngleUnit },
    SetDecimalPlaces { places: usize },
}

/// Messages from the engine to the list panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToPanel {
    /// The measurement list to show, with the state of the action buttons.
    ListUpdated {
        rows: Vec<MeasurementRow>,
        can_undo: bool,
        can_redo: bool,
        can_reset: bool,
    },

    /// The tool closed; the panel empties its list.
    Closed,

    /// A request was rejected. Nothing changed.
    Error {
        message: String,
        can_undo: bool,
        can_redo: bool,
    },
}
