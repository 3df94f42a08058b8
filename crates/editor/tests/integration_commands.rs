//! Integration tests for the JSON command protocol.

use room_editor_lib::command::{execute_json, execute_json_batch};
use room_editor_lib::harness::EditorHarness;

#[test]
fn test_command_place_select_delete() {
    let mut h = EditorHarness::new();
    let resp = execute_json(&mut h.session, r#"{"command": "place", "item_id": "desk-01"}"#).unwrap();
    let id = resp.data.unwrap()["id"].as_str().unwrap().to_string();

    let cmd = format!(r#"{{"command": "select", "ids": ["{id}"]}}"#);
    assert!(execute_json(&mut h.session, &cmd).unwrap().success);

    let resp = execute_json(&mut h.session, r#"{"command": "delete_selected"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["removed"], 1);
    assert_eq!(h.object_count(), 0);
}

#[test]
fn test_command_select_unknown_fails() {
    let mut h = EditorHarness::new();
    let resp = execute_json(&mut h.session, r#"{"command": "select", "ids": ["nope"]}"#).unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("nope"));
}

#[test]
fn test_command_copy_paste_batch() {
    let mut h = EditorHarness::new();
    let desk = h.place("desk-01").unwrap();
    let lamp = h.place("lamp-01").unwrap();

    let batch = format!(
        r#"[
            {{"command": "select", "ids": ["{desk}", "{lamp}"]}},
            {{"command": "copy"}},
            {{"command": "paste"}},
            {{"command": "inspect"}}
        ]"#
    );
    let responses = execute_json_batch(&mut h.session, &batch).unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[1].data.as_ref().unwrap()["copied"], 2);
    assert_eq!(responses[2].data.as_ref().unwrap()["pasted"].as_array().unwrap().len(), 2);
    assert_eq!(responses[3].data.as_ref().unwrap()["object_count"], 4);
}

#[test]
fn test_command_keyboard_undo() {
    let mut h = EditorHarness::new();
    h.place("desk-01").unwrap();
    let resp = execute_json(&mut h.session, r#"{"command": "key", "key": "z", "ctrl": true}"#).unwrap();
    assert_eq!(resp.data.unwrap()["shortcut"], "undo");
    assert_eq!(h.object_count(), 0);
}

#[test]
fn test_command_numpad_preset() {
    let mut h = EditorHarness::new();
    let resp = execute_json(
        &mut h.session,
        r#"{"command": "key", "key": "7", "code": "Numpad7"}"#,
    )
    .unwrap();
    assert!(resp.success);
    let inspect = execute_json(&mut h.session, r#"{"command": "inspect"}"#).unwrap();
    assert_eq!(inspect.data.unwrap()["view"], "top");
}

#[test]
fn test_command_pointer_click() {
    let mut h = EditorHarness::new();
    let desk = h.place("desk-01").unwrap();
    let pos = h.screen_pos_of(&desk).unwrap();

    let down = format!(
        r#"{{"command": "pointer_down", "x": {}, "y": {}, "time_ms": 0}}"#,
        pos.x, pos.y
    );
    let resp = execute_json(&mut h.session, &down).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["kind"], "armed");
    assert_eq!(data["object"], desk.as_str());

    let resp = execute_json(&mut h.session, r#"{"command": "pointer_up", "time_ms": 80}"#).unwrap();
    assert_eq!(resp.data.unwrap()["kind"], "click");
}

#[test]
fn test_command_rotation_and_size() {
    let mut h = EditorHarness::new();
    let desk = h.place("desk-01").unwrap();
    h.session.select(&desk);

    let resp = execute_json(
        &mut h.session,
        r#"{"command": "set_rotation", "axis": "y", "degrees": 90}"#,
    )
    .unwrap();
    assert_eq!(resp.data.unwrap()["changed"], 1);
    let rot = h.object(&desk).unwrap().rotation.y;
    assert!((rot - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

    let resp = execute_json(&mut h.session, r#"{"command": "set_size_class", "size": "large"}"#).unwrap();
    assert!(resp.success);
    let inspect = execute_json(&mut h.session, r#"{"command": "inspect"}"#).unwrap();
    assert_eq!(inspect.data.unwrap()["size"], "large");
}

#[test]
fn test_command_save_and_leave() {
    let mut h = EditorHarness::new();
    h.place("desk-01").unwrap();

    let resp = execute_json(&mut h.session, r#"{"command": "leave_editor", "confirm": false}"#).unwrap();
    assert_eq!(resp.data.unwrap()["left"], false);

    assert!(execute_json(&mut h.session, r#"{"command": "save"}"#).unwrap().success);
    let resp = execute_json(&mut h.session, r#"{"command": "notices"}"#).unwrap();
    let notices = resp.data.unwrap();
    let messages: Vec<&str> = notices
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["message"].as_str())
        .collect();
    assert!(messages.contains(&"Project saved successfully"));

    let resp = execute_json(&mut h.session, r#"{"command": "leave_editor", "confirm": false}"#).unwrap();
    assert_eq!(resp.data.unwrap()["left"], true);
}

#[test]
fn test_command_tick_reports_frame() {
    let mut h = EditorHarness::new();
    execute_json(&mut h.session, r#"{"command": "set_view", "preset": "front"}"#).unwrap();
    let resp = execute_json(&mut h.session, r#"{"command": "tick", "dt": 0.1}"#).unwrap();
    assert_eq!(resp.data.unwrap()["transitioning"], true);
    let resp = execute_json(&mut h.session, r#"{"command": "tick", "dt": 2.0}"#).unwrap();
    assert_eq!(resp.data.unwrap()["transitioning"], false);
}

#[test]
fn test_command_unknown_fails_to_parse() {
    let mut h = EditorHarness::new();
    assert!(execute_json(&mut h.session, r#"{"command": "fly"}"#).is_err());
}
