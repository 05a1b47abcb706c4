pub mod annotation;
pub mod config;
pub mod history;
mod record;
pub mod replay;
pub mod store;
pub mod types;

use tracing::{info, instrument, warn};

use measure_ops::{Formatter, MAX_DECIMAL_PLACES};
use measure_types::{
    AngleUnit, EdgeEntry, Entry, HelperId, LabelScope, LengthUnit, PointEntry, Selection,
    SequenceNumber, SourceMeta,
};
use scene_port::Scene;

use crate::annotation::AnnotationRenderer;
use crate::config::MeasureConfig;
use crate::store::MeasurementStore;
use crate::types::{EngineError, HistorySnapshot, MeasurementRow, RecordOutcome, ToolState};

/// The measurement tool engine.
///
/// Turns picks into numbered entries, draws their annotations through the
/// injected scene, and keeps an undoable history. Every change that is not a
/// plain append (undo, redo, delete, unit or precision change) clears the
/// scene and replays the affected entry list from scratch.
pub struct MeasurementEngine<S: Scene> {
    store: MeasurementStore,
    renderer: AnnotationRenderer<S>,
    formatter: Formatter,
    /// Rows for the list panel, in the order they were produced.
    rows: Vec<MeasurementRow>,
    state: ToolState,
}

impl<S: Scene> MeasurementEngine<S> {
    /// Create a closed engine drawing into `scene`.
    pub fn new(scene: S, config: MeasureConfig) -> Self {
        Self {
            store: MeasurementStore::new(),
            renderer: AnnotationRenderer::new(scene, config.render),
            formatter: config.formatter(),
            rows: Vec::new(),
            state: ToolState::Closed,
        }
    }

    /// Open the tool. History starts empty.
    #[instrument(skip(self))]
    pub fn open(&mut self) {
        self.store.clear_history();
        self.state = ToolState::Open;
        info!("measurement tool opened");
    }

    /// Close the tool, removing every measurement and forgetting history.
    #[instrument(skip(self))]
    pub fn close(&mut self) -> Result<(), EngineError> {
        self.store.clear_history();
        self.state = ToolState::Closed;
        self.clear_visuals()?;
        info!("measurement tool closed");
        Ok(())
    }

    /// Record a pick. A pick already stored for the same object is ignored.
    #[instrument(skip(self))]
    pub fn record_selection(
        &mut self,
        selection: &Selection,
        source: SourceMeta,
    ) -> Result<RecordOutcome, EngineError> {
        if self.state != ToolState::Open {
            warn!("selection while closed");
            return Err(EngineError::ToolClosed);
        }

        let duplicate = match selection {
            Selection::Point(p) => self.store.contains_point(source.part, &p.center),
            Selection::Edge(e) => {
                self.store
                    .contains_edge(source.edge_object(), &e.start, &e.end)
            }
        };
        if duplicate {
            info!("duplicate selection ignored");
            return Ok(RecordOutcome::Duplicate);
        }

        self.store.snapshot_to_past();
        self.store.clear_future();
        let number = match selection {
            Selection::Point(p) => self.record_point(p, source)?,
            Selection::Edge(e) => self.record_edge(e, source)?,
        };
        info!(number, "entry recorded");
        Ok(RecordOutcome::Recorded(number))
    }

    /// Delete an entry. Survivors are renumbered and every derived
    /// measurement is rebuilt.
    #[instrument(skip(self))]
    pub fn delete_entry(&mut self, number: SequenceNumber) -> Result<(), EngineError> {
        if !self.store.contains(number) {
            warn!(number, "delete of unknown entry");
            return Err(EngineError::EntryNotFound { number });
        }
        let remaining = self.store.snapshot().without(number);
        self.store.snapshot_to_past();
        self.store.clear_future();
        self.rebuild(remaining)?;
        info!(number, remaining = self.store.len(), "entry deleted");
        Ok(())
    }

    /// Restore the state before the last change.
    ///
    /// If the replay fails, both history stacks are restored and the state
    /// before the undo is redrawn.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<(), EngineError> {
        let snapshot = self.store.pop_past()?;
        let current = self.store.snapshot();
        if let Err(e) = self.rebuild(snapshot.clone()) {
            self.store.push_past(snapshot);
            self.restore_after_failed_step(current);
            return Err(e);
        }
        self.store.push_future(current);
        info!(entries = self.store.len(), "undo");
        Ok(())
    }

    /// Re-apply the last undone change. Failure is handled like [`Self::undo`].
    #[instrument(skip(self))]
    pub fn redo(&mut self) -> Result<(), EngineError> {
        let snapshot = self.store.pop_future()?;
        let current = self.store.snapshot();
        if let Err(e) = self.rebuild(snapshot.clone()) {
            self.store.push_future(snapshot);
            self.restore_after_failed_step(current);
            return Err(e);
        }
        self.store.push_past(current);
        info!(entries = self.store.len(), "redo");
        Ok(())
    }

    fn restore_after_failed_step(&mut self, previous: HistorySnapshot) {
        if let Err(e) = self.rebuild(previous) {
            warn!(error = %e, "could not redraw state after failed history step");
        }
    }

    /// Clear every measurement. Undoable. Returns `false` when there was
    /// nothing to clear.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<bool, EngineError> {
        if self.store.is_empty() {
            return Ok(false);
        }
        self.store.snapshot_to_past();
        self.store.clear_future();
        self.clear_visuals()?;
        info!("measurements reset");
        Ok(true)
    }

    /// Switch the length display unit. Returns `false` when unchanged.
    #[instrument(skip(self))]
    pub fn change_length_unit(&mut self, unit: LengthUnit) -> Result<bool, EngineError> {
        if self.formatter.units.length == unit {
            return Ok(false);
        }
        self.formatter.units.length = unit;
        self.redraw()?;
        info!(?unit, "length unit changed");
        Ok(true)
    }

    /// Switch the angle display unit. Returns `false` when unchanged.
    #[instrument(skip(self))]
    pub fn change_angle_unit(&mut self, unit: AngleUnit) -> Result<bool, EngineError> {
        if self.formatter.units.angle == unit {
            return Ok(false);
        }
        self.formatter.units.angle = unit;
        self.redraw()?;
        info!(?unit, "angle unit changed");
        Ok(true)
    }

    /// Change display precision. Returns `false` when unchanged.
    #[instrument(skip(self))]
    pub fn set_decimal_places(&mut self, places: usize) -> Result<bool, EngineError> {
        if places > MAX_DECIMAL_PLACES {
            warn!(places, "decimal places out of range");
            return Err(EngineError::InvalidPrecision { places });
        }
        if self.formatter.display.decimal_places == places {
            return Ok(false);
        }
        self.formatter.display.decimal_places = places;
        self.redraw()?;
        info!(places, "decimal places changed");
        Ok(true)
    }

    /// Clear and rebuild from the given lists without touching history.
    pub fn replay(
        &mut self,
        points: Vec<PointEntry>,
        edges: Vec<EdgeEntry>,
    ) -> Result<(), EngineError> {
        self.rebuild(HistorySnapshot { points, edges })
    }

    fn redraw(&mut self) -> Result<(), EngineError> {
        let snapshot = self.store.snapshot();
        self.rebuild(snapshot)
    }

    /// Show or hide a row's helpers and the labels `scope` reaches.
    pub fn set_row_visibility(
        &mut self,
        helpers: &[HelperId],
        visible: bool,
        scope: LabelScope,
    ) -> Result<(), EngineError> {
        self.renderer.set_visibility(helpers, visible, scope)?;
        Ok(())
    }

    /// Highlight a row's helpers while the panel hovers it.
    pub fn highlight(
        &mut self,
        helpers: &[HelperId],
        on: bool,
        scope: LabelScope,
    ) -> Result<(), EngineError> {
        self.renderer.set_highlight(helpers, on, scope)?;
        Ok(())
    }

    /// Highlight the primitive and index label of one entry.
    pub fn highlight_entry(&mut self, number: SequenceNumber, on: bool) -> Result<(), EngineError> {
        let entry = self
            .store
            .find(number)
            .ok_or(EngineError::EntryNotFound { number })?;
        let scope = match entry {
            Entry::Point(_) => LabelScope::All,
            Entry::Edge(_) => LabelScope::IndexOnly,
        };
        let helper = entry.label_helper();
        self.renderer.set_highlight(&[helper], on, scope)?;
        Ok(())
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn store(&self) -> &MeasurementStore {
        &self.store
    }

    pub fn renderer(&self) -> &AnnotationRenderer<S> {
        &self.renderer
    }

    pub fn scene(&self) -> &S {
        self.renderer.scene()
    }

    /// Mutable access to the scene, e.g. to move objects between picks.
    pub fn scene_mut(&mut self) -> &mut S {
        self.renderer.scene_mut()
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ToolState::Open
    }

    pub fn can_undo(&self) -> bool {
        self.store.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.history().can_redo()
    }

    pub fn can_reset(&self) -> bool {
        !self.store.is_empty()
    }
}
