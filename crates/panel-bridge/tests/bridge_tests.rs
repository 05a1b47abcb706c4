use measure_engine::config::MeasureConfig;
use measure_types::*;
use panel_bridge::messages::*;
use panel_bridge::*;
use scene_port::MockScene;
use uuid::Uuid;

// ── Helper functions ─────────────────────────────────────────────────────

fn open_session() -> PanelSession<MockScene> {
    let mut session = PanelSession::new(MockScene::new(), MeasureConfig::default());
    dispatch(&mut session, PanelToEngine::Open);
    session
}

fn select_point(session: &mut PanelSession<MockScene>, part: Uuid, x: f64, y: f64) -> EngineToPanel {
    dispatch(
        session,
        PanelToEngine::Select {
            selection: Selection::point(Vec3::new(x, y, 0.0)),
            source: SourceMeta::part(part),
        },
    )
}

fn rows(response: &EngineToPanel) -> Vec<String> {
    match response {
        EngineToPanel::ListUpdated { rows, .. } => rows.iter().map(|r| r.text.clone()).collect(),
        other => panic!("expected ListUpdated, got {:?}", other),
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────────

#[test]
fn select_returns_updated_list() {
    let mut session = open_session();
    let part = Uuid::new_v4();
    select_point(&mut session, part, 0.0, 0.0);
    let response = select_point(&mut session, part, 10.0, 0.0);

    assert_eq!(rows(&response), vec!["Distance: 10.00 mm"]);
    match response {
        EngineToPanel::ListUpdated {
            can_undo,
            can_redo,
            can_reset,
            ..
        } => {
            assert!(can_undo);
            assert!(!can_redo);
            assert!(can_reset);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn select_before_open_is_an_error() {
    let mut session = PanelSession::new(MockScene::new(), MeasureConfig::default());
    let response = select_point(&mut session, Uuid::new_v4(), 0.0, 0.0);
    match response {
        EngineToPanel::Error {
            message, can_undo, ..
        } => {
            assert!(message.contains("closed"));
            assert!(!can_undo);
        }
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn undo_with_empty_history_reports_error() {
    let mut session = open_session();
    let response = dispatch(&mut session, PanelToEngine::Undo);
    assert!(matches!(response, EngineToPanel::Error { can_undo: false, .. }));
}

#[test]
fn undo_redo_through_bridge() {
    let mut session = open_session();
    let part = Uuid::new_v4();
    select_point(&mut session, part, 0.0, 0.0);
    select_point(&mut session, part, 0.0, 4.0);

    let undone = dispatch(&mut session, PanelToEngine::Undo);
    assert!(rows(&undone).is_empty());

    let redone = dispatch(&mut session, PanelToEngine::Redo);
    assert_eq!(rows(&redone), vec!["Distance: 4.00 mm"]);
}

#[test]
fn delete_entry_renumbers() {
    let mut session = open_session();
    let part = Uuid::new_v4();
    select_point(&mut session, part, 0.0, 0.0);
    select_point(&mut session, part, 3.0, 0.0);
    select_point(&mut session, part, 3.0, 4.0);

    let response = dispatch(&mut session, PanelToEngine::DeleteEntry { number: 1 });
    assert_eq!(rows(&response), vec!["Distance: 4.00 mm"]);
    match response {
        EngineToPanel::ListUpdated { rows, .. } => assert_eq!(rows[0].entries, vec![1, 2]),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unit_change_updates_rows() {
    let mut session = open_session();
    let part = Uuid::new_v4();
    select_point(&mut session, part, 0.0, 0.0);
    select_point(&mut session, part, 25.4, 0.0);

    let response = dispatch(
        &mut session,
        PanelToEngine::SetLengthUnit {
            unit: LengthUnit::Inches,
        },
    );
    assert_eq!(rows(&response), vec!["Distance: 1.00 in"]);

    let response = dispatch(&mut session, PanelToEngine::SetDecimalPlaces { places: 1 });
    assert_eq!(rows(&response), vec!["Distance: 1.0 in"]);
}

#[test]
fn out_of_range_decimal_places_rejected() {
    let mut session = open_session();
    let part = Uuid::new_v4();
    select_point(&mut session, part, 0.0, 0.0);
    select_point(&mut session, part, 10.0, 0.0);

    let reply = dispatch_json(&mut session, r#"{"type":"SetDecimalPlaces","places":70000}"#);
    let parsed: EngineToPanel = serde_json::from_str(&reply).unwrap();
    match parsed {
        EngineToPanel::Error {
            message, can_undo, ..
        } => {
            assert!(message.contains("70000"), "{}", message);
            assert!(can_undo);
        }
        other => panic!("expected Error, got {:?}", other),
    }

    assert_eq!(session.engine.formatter().display.decimal_places, 2);
    assert_eq!(session.engine.rows()[0].text, "Distance: 10.00 mm");
    assert_eq!(
        session.engine.scene().label_texts(LabelKind::Length),
        vec!["10.00 mm"]
    );
}

#[test]
fn toggle_row_visibility_hides_helpers() {
    let mut session = open_session();
    let part = Uuid::new_v4();
    select_point(&mut session, part, 0.0, 0.0);
    select_point(&mut session, part, 5.0, 0.0);

    dispatch(
        &mut session,
        PanelToEngine::ToggleRowVisibility {
            row: 0,
            visible: false,
        },
    );
    let line = session.engine.rows()[0].helpers[0];
    let scene = session.engine.scene();
    assert!(!scene.node(line).unwrap().visible);
    assert!(!scene.find_label("5.00 mm").unwrap().1.visible);
}

#[test]
fn unknown_row_is_an_error() {
    let mut session = open_session();
    let response = dispatch(&mut session, PanelToEngine::HoverRow { row: 3, on: true });
    match response {
        EngineToPanel::Error { message, .. } => assert!(message.contains("row")),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn hovering_a_new_row_clears_the_old_one() {
    let mut session = open_session();
    let part = Uuid::new_v4();
    select_point(&mut session, part, 0.0, 0.0);
    select_point(&mut session, part, 5.0, 0.0);
    select_point(&mut session, part, 5.0, 5.0);

    dispatch(&mut session, PanelToEngine::HoverRow { row: 0, on: true });
    dispatch(&mut session, PanelToEngine::HoverRow { row: 2, on: true });

    let first = session.engine.rows()[0].helpers[0];
    let last = session.engine.rows()[2].helpers[0];
    assert!(!session.engine.scene().node(first).unwrap().highlighted);
    assert!(session.engine.scene().node(last).unwrap().highlighted);
    assert_eq!(session.hovered_row, Some(2));

    dispatch(&mut session, PanelToEngine::HoverRow { row: 2, on: false });
    assert!(!session.engine.scene().node(last).unwrap().highlighted);
    assert_eq!(session.hovered_row, None);
}

#[test]
fn close_reports_closed_and_empties_scene() {
    let mut session = open_session();
    select_point(&mut session, Uuid::new_v4(), 0.0, 0.0);
    let response = dispatch(&mut session, PanelToEngine::Close);
    assert_eq!(response, EngineToPanel::Closed);
    assert!(session.engine.scene().is_empty());
}

// ── JSON ─────────────────────────────────────────────────────────────────

#[test]
fn json_select_round_trip() {
    let mut session = open_session();
    let part = Uuid::new_v4();
    let first = format!(
        r#"{{"type":"Select","selection":{{"type":"Point","center":[0.0,0.0,0.0]}},"source":{{"part":"{}"}}}}"#,
        part
    );
    let second = format!(
        r#"{{"type":"Select","selection":{{"type":"Point","center":[0.0,10.0,0.0]}},"source":{{"part":"{}"}}}}"#,
        part
    );
    dispatch_json(&mut session, &first);
    let reply = dispatch_json(&mut session, &second);

    let parsed: EngineToPanel = serde_json::from_str(&reply).unwrap();
    assert_eq!(rows(&parsed), vec!["Distance: 10.00 mm"]);
}

#[test]
fn json_edge_selection_parses() {
    let json = r#"{"type":"Select","selection":{"type":"Edge","start":[0,0,0],"end":[3,0,0],"length":3.0},"source":{"part":"00000000-0000-0000-0000-000000000001","edge_owner":"00000000-0000-0000-0000-000000000002"}}"#;
    let msg: PanelToEngine = serde_json::from_str(json).unwrap();
    match msg {
        PanelToEngine::Select { selection, source } => {
            assert!(selection.is_edge());
            assert!(source.edge_owner.is_some());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn malformed_json_reports_error() {
    let mut session = open_session();
    let reply = dispatch_json(&mut session, "{ nope");
    let parsed: EngineToPanel = serde_json::from_str(&reply).unwrap();
    match parsed {
        EngineToPanel::Error { message, .. } => assert!(message.contains("serialization")),
        other => panic!("expected Error, got {:?}", other),
    }
}

#[test]
fn unit_messages_use_variant_names() {
    let msg: PanelToEngine =
        serde_json::from_str(r#"{"type":"SetAngleUnit","unit":"Radians"}"#).unwrap();
    assert!(matches!(
        msg,
        PanelToEngine::SetAngleUnit {
            unit: AngleUnit::Radians
        }
    ));
}
