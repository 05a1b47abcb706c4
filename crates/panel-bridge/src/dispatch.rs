use tracing::{debug, warn};

use scene_port::Scene;

use crate::messages::{EngineToPanel, PanelToEngine};
use crate::session::{BridgeError, PanelSession};

/// Dispatch a panel message to the engine and return a response.
///
/// Errors never escape: they become `EngineToPanel::Error`, which still
/// carries the undo/redo button state.
pub fn dispatch<S: Scene>(session: &mut PanelSession<S>, msg: PanelToEngine) -> EngineToPanel {
    debug!(?msg, "panel message");
    match handle_message(session, msg) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "panel request rejected");
            error_response(session, e)
        }
    }
}

/// Parse a JSON message, dispatch it, and serialize the response.
pub fn dispatch_json<S: Scene>(session: &mut PanelSession<S>, json: &str) -> String {
    let response = match serde_json::from_str::<PanelToEngine>(json) {
        Ok(msg) => dispatch(session, msg),
        Err(e) => error_response(
            session,
            BridgeError::Serialization {
                reason: e.to_string(),
            },
        ),
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"type":"Error","message":"serialization error: {}","can_undo":false,"can_redo":false}}"#,
            e.to_string().replace('"', "'")
        )
    })
}

fn handle_message<S: Scene>(
    session: &mut PanelSession<S>,
    msg: PanelToEngine,
) -> Result<EngineToPanel, BridgeError> {
    match msg {
        // -- Lifecycle --
        PanelToEngine::Open => {
            session.engine.open();
            Ok(list_updated(session))
        }

        PanelToEngine::Close => {
            session.hovered_row = None;
            session.engine.close()?;
            Ok(EngineToPanel::Closed)
        }

        // -- Picking --
        PanelToEngine::Select { selection, source } => {
            session.engine.record_selection(&selection, source)?;
            Ok(list_updated(session))
        }

        // -- List actions --
        PanelToEngine::DeleteEntry { number } => {
            session.engine.delete_entry(number)?;
            session.hovered_row = None;
            Ok(list_updated(session))
        }

        PanelToEngine::ToggleRowVisibility { row, visible } => {
            let (helpers, scope, can_toggle) = {
                let r = session.row(row)?;
                (r.helpers.clone(), r.label_scope, r.can_toggle_visibility)
            };
            if can_toggle {
                session.engine.set_row_visibility(&helpers, visible, scope)?;
            }
            Ok(list_updated(session))
        }

        PanelToEngine::HoverRow { row, on } => {
            if on {
                clear_hover(session)?;
            }
            let (helpers, scope) = {
                let r = session.row(row)?;
                (r.helpers.clone(), r.label_scope)
            };
            session.engine.highlight(&helpers, on, scope)?;
            session.hovered_row = on.then_some(row);
            Ok(list_updated(session))
        }

        PanelToEngine::HoverEntry { number, on } => {
            session.engine.highlight_entry(number, on)?;
            Ok(list_updated(session))
        }

        PanelToEngine::Reset => {
            session.engine.reset()?;
            session.hovered_row = None;
            Ok(list_updated(session))
        }

        // -- History --
        PanelToEngine::Undo => {
            session.engine.undo()?;
            session.hovered_row = None;
            Ok(list_updated(session))
        }

        PanelToEngine::Redo => {
            session.engine.redo()?;
            session.hovered_row = None;
            Ok(list_updated(session))
        }

        // -- Preferences --
        PanelToEngine::SetLengthUnit { unit } => {
            if session.engine.change_length_unit(unit)? {
                session.hovered_row = None;
            }
            Ok(list_updated(session))
        }

        PanelToEngine::SetAngleUnit { unit } => {
            if session.engine.change_angle_unit(unit)? {
                session.hovered_row = None;
            }
            Ok(list_updated(session))
        }

        PanelToEngine::SetDecimalPlaces { places } => {
            if session.engine.set_decimal_places(places)? {
                session.hovered_row = None;
            }
            Ok(list_updated(session))
        }
    }
}

/// Un-highlight the previously hovered row if it is still listed.
fn clear_hover<S: Scene>(session: &mut PanelSession<S>) -> Result<(), BridgeError> {
    let Some(index) = session.hovered_row.take() else {
        return Ok(());
    };
    let Some(row) = session.engine.rows().get(index) else {
        return Ok(());
    };
    let (helpers, scope) = (row.helpers.clone(), row.label_scope);
    session.engine.highlight(&helpers, false, scope)?;
    Ok(())
}

/// Build a ListUpdated response from the current engine state.
fn list_updated<S: Scene>(session: &PanelSession<S>) -> EngineToPanel {
    let engine = &session.engine;
    EngineToPanel::ListUpdated {
        rows: engine.rows().to_vec(),
        can_undo: engine.can_undo(),
        can_redo: engine.can_redo(),
        can_reset: engine.can_reset(),
    }
}

fn error_response<S: Scene>(session: &PanelSession<S>, error: BridgeError) -> EngineToPanel {
    EngineToPanel::Error {
        message: error.to_string(),
        can_undo: session.engine.can_undo(),
        can_redo: session.engine.can_redo(),
    }
}
