//! SessionBuilder: fluent API for scripting measurement sessions in tests.
//!
//! Wraps `panel_bridge::dispatch()` to test the real dispatch path, not a simulation.
//! Parts are addressed by name instead of UUID for readability.

use std::collections::HashMap;

use measure_engine::config::MeasureConfig;
use measure_engine::types::MeasurementRow;
use measure_engine::MeasurementEngine;
use measure_types::*;
use panel_bridge::messages::*;
use panel_bridge::PanelSession;
use scene_port::MockScene;
use uuid::Uuid;

use crate::helpers::*;
use crate::oracle;

/// A fluent builder for scripting and verifying measurement sessions.
///
/// Wraps a `PanelSession` over a `MockScene` and keeps named parts plus a
/// log of every dispatched message.
pub struct SessionBuilder {
    pub session: PanelSession<MockScene>,
    parts: HashMap<String, ObjectId>,
    history: Vec<(String, String)>,
    auto_check: bool,
}

impl SessionBuilder {
    /// Open a session with default units (millimetres, degrees).
    pub fn new() -> Self {
        Self::with_config(MeasureConfig::default())
    }

    /// Open a session with the given config.
    pub fn with_config(config: MeasureConfig) -> Self {
        let mut builder = Self {
            session: PanelSession::new(MockScene::new(), config),
            parts: HashMap::new(),
            history: Vec::new(),
            auto_check: false,
        };
        builder.send("Open", PanelToEngine::Open);
        builder
    }

    /// Enable auto-checking: after every step, run every oracle.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    // ── Parts ───────────────────────────────────────────────────────────

    /// Register a part at the world origin.
    pub fn add_part(&mut self, name: &str) -> Result<ObjectId, HarnessError> {
        if self.parts.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        let id = Uuid::new_v4();
        self.parts.insert(name.to_string(), id);
        Ok(id)
    }

    /// Register a part translated by `offset`.
    pub fn add_part_at(&mut self, name: &str, offset: Vec3) -> Result<ObjectId, HarnessError> {
        let id = self.add_part(name)?;
        self.session.engine.scene_mut().set_translation(id, offset);
        Ok(id)
    }

    pub fn part_id(&self, name: &str) -> Result<ObjectId, HarnessError> {
        self.parts
            .get(name)
            .copied()
            .ok_or_else(|| HarnessError::PartNotFound {
                name: name.to_string(),
            })
    }

    // ── Picks ───────────────────────────────────────────────────────────

    /// Pick a world-space point on a part.
    pub fn point(&mut self, part: &str, p: Vec3) -> Result<&mut Self, HarnessError> {
        let source = SourceMeta::part(self.part_id(part)?);
        self.select("Point", Selection::point(p), source)
    }

    /// Pick an edge of a part, endpoints local to the part.
    pub fn edge(&mut self, part: &str, start: Vec3, end: Vec3) -> Result<&mut Self, HarnessError> {
        let source = SourceMeta::part(self.part_id(part)?);
        self.select("Edge", Selection::edge(start, end), source)
    }

    /// Pick the centre of a circular edge on an untransformed part.
    pub fn circle(&mut self, part: &str, center: Vec3, radius: f64) -> Result<&mut Self, HarnessError> {
        let source = SourceMeta::part(self.part_id(part)?);
        self.select("Circle", circle_pick(center, radius), source)
    }

    /// Pick every corner of an outline in order.
    pub fn points(&mut self, part: &str, corners: &[Vec3]) -> Result<&mut Self, HarnessError> {
        for &c in corners {
            self.point(part, c)?;
        }
        Ok(self)
    }

    fn select(
        &mut self,
        op: &str,
        selection: Selection,
        source: SourceMeta,
    ) -> Result<&mut Self, HarnessError> {
        self.expect_list(op, PanelToEngine::Select { selection, source })
    }

    // ── List Actions ────────────────────────────────────────────────────

    pub fn delete(&mut self, number: SequenceNumber) -> Result<&mut Self, HarnessError> {
        self.expect_list("DeleteEntry", PanelToEngine::DeleteEntry { number })
    }

    pub fn reset(&mut self) -> Result<&mut Self, HarnessError> {
        self.expect_list("Reset", PanelToEngine::Reset)
    }

    pub fn hide_row(&mut self, row: usize) -> Result<&mut Self, HarnessError> {
        self.expect_list(
            "ToggleRowVisibility",
            PanelToEngine::ToggleRowVisibility {
                row,
                visible: false,
            },
        )
    }

    pub fn hover_row(&mut self, row: usize, on: bool) -> Result<&mut Self, HarnessError> {
        self.expect_list("HoverRow", PanelToEngine::HoverRow { row, on })
    }

    // ── History ─────────────────────────────────────────────────────────

    /// Undo the last change.
    pub fn undo(&mut self) -> Result<&mut Self, HarnessError> {
        self.expect_list("Undo", PanelToEngine::Undo)
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> Result<&mut Self, HarnessError> {
        self.expect_list("Redo", PanelToEngine::Redo)
    }

    // ── Preferences ─────────────────────────────────────────────────────

    pub fn length_unit(&mut self, unit: LengthUnit) -> Result<&mut Self, HarnessError> {
        self.expect_list("SetLengthUnit", PanelToEngine::SetLengthUnit { unit })
    }

    pub fn angle_unit(&mut self, unit: AngleUnit) -> Result<&mut Self, HarnessError> {
        self.expect_list("SetAngleUnit", PanelToEngine::SetAngleUnit { unit })
    }

    pub fn decimals(&mut self, places: usize) -> Result<&mut Self, HarnessError> {
        self.expect_list("SetDecimalPlaces", PanelToEngine::SetDecimalPlaces { places })
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    pub fn close(&mut self) -> Result<&mut Self, HarnessError> {
        match self.send("Close", PanelToEngine::Close) {
            EngineToPanel::Closed => Ok(self),
            EngineToPanel::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            _ => Err(HarnessError::DispatchError {
                message: "unexpected close response".into(),
            }),
        }
    }

    pub fn reopen(&mut self) -> Result<&mut Self, HarnessError> {
        self.expect_list("Open", PanelToEngine::Open)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn engine(&self) -> &MeasurementEngine<MockScene> {
        &self.session.engine
    }

    pub fn scene(&self) -> &MockScene {
        self.session.engine.scene()
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        self.session.engine.rows()
    }

    pub fn row_texts(&self) -> Vec<String> {
        self.rows().iter().map(|r| r.text.clone()).collect()
    }

    /// Rows of one category, in list order.
    pub fn rows_of(&self, category: Category) -> Vec<&MeasurementRow> {
        self.rows().iter().filter(|r| r.category == category).collect()
    }

    pub fn entry_count(&self) -> usize {
        self.session.engine.store().len()
    }

    /// Every dispatched operation with a short outcome, oldest first.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    /// Fail with the first oracle that does not pass.
    pub fn check(&self) -> Result<(), HarnessError> {
        for verdict in oracle::run_all_checks(self.engine()) {
            if !verdict.passed {
                return Err(HarnessError::OracleFailure {
                    oracle: verdict.oracle_name,
                    detail: verdict.detail,
                });
            }
        }
        Ok(())
    }

    // ── Dispatch ────────────────────────────────────────────────────────

    fn send(&mut self, op: &str, msg: PanelToEngine) -> EngineToPanel {
        let response = panel_bridge::dispatch(&mut self.session, msg);
        let outcome = match &response {
            EngineToPanel::ListUpdated { rows, .. } => format!("ListUpdated({} rows)", rows.len()),
            EngineToPanel::Closed => "Closed".to_string(),
            EngineToPanel::Error { message, .. } => format!("Error({})", message),
        };
        self.history.push((op.to_string(), outcome));
        response
    }

    fn expect_list(&mut self, op: &str, msg: PanelToEngine) -> Result<&mut Self, HarnessError> {
        match self.send(op, msg) {
            EngineToPanel::ListUpdated { .. } => {
                if self.auto_check {
                    self.check()?;
                }
                Ok(self)
            }
            EngineToPanel::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            EngineToPanel::Closed => Err(HarnessError::DispatchError {
                message: format!("unexpected Closed response to {}", op),
            }),
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
