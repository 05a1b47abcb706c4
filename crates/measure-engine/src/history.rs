use crate::types::{EngineError, HistorySnapshot, HistoryStack};

/// Two-stack snapshot history.
#[derive(Debug, Default)]
pub struct History {
    past: Vec<HistorySnapshot>,
    future: Vec<HistorySnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot onto the past stack. The future stack is left alone:
    /// `redo` uses this to re-populate the past.
    pub fn push_past(&mut self, snapshot: HistorySnapshot) {
        self.past.push(snapshot);
    }

    /// Push a snapshot onto the future stack.
    pub fn push_future(&mut self, snapshot: HistorySnapshot) {
        self.future.push(snapshot);
    }

    /// Pop the most recent past snapshot.
    pub fn pop_past(&mut self) -> Result<HistorySnapshot, EngineError> {
        self.past.pop().ok_or(EngineError::EmptyHistory {
            stack: HistoryStack::Past,
        })
    }

    /// Pop the most recent future snapshot.
    pub fn pop_future(&mut self) -> Result<HistorySnapshot, EngineError> {
        self.future.pop().ok_or(EngineError::EmptyHistory {
            stack: HistoryStack::Future,
        })
    }

    pub fn clear_future(&mut self) {
        self.future.clear();
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}
