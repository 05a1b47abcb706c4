use serde::{Deserialize, Serialize};

use crate::helper::HelperId;
use crate::selection::{EdgePick, PointPick, SourceMeta};
use crate::Vec3;

/// Position of an entry in the shared point+edge numbering.
/// Positional and display-only: deletion renumbers the survivors.
pub type SequenceNumber = u32;

/// A stored point pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointEntry {
    pub number: SequenceNumber,
    /// World-space position.
    pub center: Vec3,
    pub source: SourceMeta,
    /// The raw pick, replayed on rebuild.
    pub pick: PointPick,
    /// The marker the index label is attached to.
    pub label_helper: HelperId,
}

/// A stored edge pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub number: SequenceNumber,
    /// Local-space endpoints on `source.edge_object()`.
    pub start: Vec3,
    pub end: Vec3,
    pub source: SourceMeta,
    pub pick: EdgePick,
    /// The edge segment its labels are attached to.
    pub label_helper: HelperId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Point,
    Edge,
}

/// One row of the measurement ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entry {
    Point(PointEntry),
    Edge(EdgeEntry),
}

impl Entry {
    pub fn number(&self) -> SequenceNumber {
        match self {
            Entry::Point(p) => p.number,
            Entry::Edge(e) => e.number,
        }
    }

    pub(crate) fn set_number(&mut self, number: SequenceNumber) {
        match self {
            Entry::Point(p) => p.number = number,
            Entry::Edge(e) => e.number = number,
        }
    }

    /// Return a copy of this entry carrying `number`.
    pub fn renumbered(mut self, number: SequenceNumber) -> Self {
        self.set_number(number);
        self
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Point(_) => EntryKind::Point,
            Entry::Edge(_) => EntryKind::Edge,
        }
    }

    pub fn label_helper(&self) -> HelperId {
        match self {
            Entry::Point(p) => p.label_helper,
            Entry::Edge(e) => e.label_helper,
        }
    }

    pub fn source(&self) -> &SourceMeta {
        match self {
            Entry::Point(p) => &p.source,
            Entry::Edge(e) => &e.source,
        }
    }

    pub fn as_point(&self) -> Option<&PointEntry> {
        match self {
            Entry::Point(p) => Some(p),
            Entry::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeEntry> {
        match self {
            Entry::Edge(e) => Some(e),
            Entry::Point(_) => None,
        }
    }
}
