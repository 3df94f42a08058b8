//! JSON command protocol.
//!
//! Hosts without direct access to the Rust API (browser, CLI scripts) drive
//! an `EditorSession` with these commands.

use serde::{Deserialize, Serialize};
use shared::SizeClass;

use crate::assets::{LoadTicket, ModelInfo};
use crate::error::AssetError;
use crate::keyboard::KeyInput;
use crate::session::EditorSession;
use crate::state::Axis;
use crate::viewport::{ScreenPos, ViewPreset};

/// A command the host can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Add a catalog item to the room
    Place { item_id: String },
    /// Delete every selected object
    DeleteSelected,
    /// Select objects; the first replaces the selection, the rest extend it
    Select { ids: Vec<String> },
    ExtendSelection { id: String },
    ClearSelection,
    Undo,
    Redo,
    Copy,
    Paste,
    Save,
    /// Key press, routed through the shortcut table
    Key {
        #[serde(flatten)]
        input: KeyInput,
    },
    PointerDown { x: f32, y: f32, time_ms: u64 },
    PointerMove { x: f32, y: f32 },
    PointerUp { time_ms: u64 },
    Orbit { d_azimuth: f32, d_polar: f32 },
    Zoom { factor: f32 },
    SetView { preset: ViewPreset },
    ResetView,
    SetRotation { axis: Axis, degrees: f32 },
    SetSizeClass { size: SizeClass },
    /// Report a host-performed model load
    CompleteLoad {
        ticket: u64,
        #[serde(default)]
        meshes: Vec<String>,
        #[serde(default)]
        error: Option<String>,
    },
    /// Advance time by `dt` seconds
    Tick { dt: f32 },
    /// Navigation away from the editor; `confirm` answers the unsaved prompt
    LeaveEditor { confirm: bool },
    /// Loads the host must perform
    LoadRequests,
    Notices,
    /// Inspect the scene: list all objects.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn to_value(value: impl Serialize) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

fn inspect(session: &EditorSession) -> serde_json::Value {
    let scene = session.scene();
    let objects: Vec<serde_json::Value> = scene
        .all()
        .iter()
        .map(|o| {
            serde_json::json!({
                "id": o.id,
                "item_id": o.item_id,
                "name": o.name,
                "kind": o.kind,
                "position": o.position.to_array(),
                "rotation": o.rotation.to_array(),
                "scale": o.scale.to_array(),
                "selected": o.selected,
                "is_fallback": o.is_fallback,
                "loading": o.visual.is_loading(),
            })
        })
        .collect();
    let history = session.history();
    serde_json::json!({
        "object_count": objects.len(),
        "objects": objects,
        "placeholder_count": scene.placeholders().len(),
        "size": scene.size_class(),
        "undo_len": history.undo_len(),
        "redo_len": history.redo_len(),
        "can_undo": history.can_undo(),
        "can_redo": history.can_redo(),
        "history_state": history.state(),
        "last_snapshot_at": history.last_snapshot().map(|s| s.timestamp.to_rfc3339()),
        "unsaved": session.has_unsaved_changes(),
        "clipboard_len": session.clipboard().len(),
        "pending_loads": session.pending_loads(),
        "view": session.viewpoint().preset(),
        "controls_enabled": session.viewpoint().controls_enabled(),
        "active_view": session.active_view(),
    })
}

/// Execute a single command on the session.
pub fn execute_command(session: &mut EditorSession, cmd: EditorCommand) -> CommandResponse {
    match cmd {
        EditorCommand::Place { item_id } => match session.add_furniture(&item_id) {
            Ok(placement) => CommandResponse::ok_with_data(to_value(placement)),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::DeleteSelected => {
            let removed = session.delete_selected();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        EditorCommand::Select { ids } => {
            session.clear_selection();
            let mut missing = Vec::new();
            for (i, id) in ids.iter().enumerate() {
                let found = if i == 0 {
                    session.select(id)
                } else {
                    session.extend_selection(id)
                };
                if !found {
                    missing.push(id.clone());
                }
            }
            if missing.is_empty() {
                CommandResponse::ok_with_data(serde_json::json!({ "selected": ids }))
            } else {
                CommandResponse::err(format!("unknown objects: {}", missing.join(", ")))
            }
        }

        EditorCommand::ExtendSelection { id } => {
            if session.extend_selection(&id) {
                CommandResponse::ok()
            } else {
                CommandResponse::err(format!("unknown object: {id}"))
            }
        }

        EditorCommand::ClearSelection => {
            session.clear_selection();
            CommandResponse::ok()
        }

        EditorCommand::Undo => {
            let success = session.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = session.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::Copy => {
            let copied = session.copy();
            CommandResponse::ok_with_data(serde_json::json!({ "copied": copied }))
        }

        EditorCommand::Paste => {
            let ids = session.paste();
            CommandResponse::ok_with_data(serde_json::json!({ "pasted": ids }))
        }

        EditorCommand::Save => match session.save() {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::Key { input } => match session.handle_key(&input) {
            Ok(shortcut) => CommandResponse::ok_with_data(serde_json::json!({ "shortcut": shortcut })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::PointerDown { x, y, time_ms } => {
            let outcome = session.pointer_down(ScreenPos::new(x, y), time_ms);
            CommandResponse::ok_with_data(to_value(outcome))
        }

        EditorCommand::PointerMove { x, y } => {
            let outcome = session.pointer_move(ScreenPos::new(x, y));
            CommandResponse::ok_with_data(to_value(outcome))
        }

        EditorCommand::PointerUp { time_ms } => {
            let outcome = session.pointer_up(time_ms);
            CommandResponse::ok_with_data(to_value(outcome))
        }

        EditorCommand::Orbit { d_azimuth, d_polar } => {
            let applied = session.orbit(d_azimuth, d_polar);
            CommandResponse::ok_with_data(serde_json::json!({ "applied": applied }))
        }

        EditorCommand::Zoom { factor } => {
            let applied = session.zoom(factor);
            CommandResponse::ok_with_data(serde_json::json!({ "applied": applied }))
        }

        EditorCommand::SetView { preset } => {
            session.set_view_preset(preset);
            CommandResponse::ok()
        }

        EditorCommand::ResetView => {
            session.reset_view();
            CommandResponse::ok()
        }

        EditorCommand::SetRotation { axis, degrees } => {
            let changed = session.set_rotation_selected(axis, degrees);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::SetSizeClass { size } => {
            session.set_size_class(size);
            CommandResponse::ok()
        }

        EditorCommand::CompleteLoad {
            ticket,
            meshes,
            error,
        } => {
            let ticket = LoadTicket(ticket);
            let result = match error {
                None => Ok(ModelInfo::from_host(meshes)),
                Some(message) => Err(AssetError::Io {
                    path: session.pending_path(ticket).unwrap_or_default().to_string(),
                    message,
                }),
            };
            match session.complete_load(ticket, result) {
                Ok(object) => CommandResponse::ok_with_data(serde_json::json!({ "object": object })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        EditorCommand::Tick { dt } => {
            let frame = session.tick(dt);
            CommandResponse::ok_with_data(serde_json::json!({
                "version": frame.version,
                "nodes": frame.nodes.len(),
                "transitioning": frame.transitioning,
            }))
        }

        EditorCommand::LeaveEditor { confirm } => {
            let left = session.leave_editor(|_| confirm);
            CommandResponse::ok_with_data(serde_json::json!({ "left": left }))
        }

        EditorCommand::LoadRequests => {
            CommandResponse::ok_with_data(to_value(session.take_load_requests()))
        }

        EditorCommand::Notices => CommandResponse::ok_with_data(to_value(session.take_notices())),

        EditorCommand::Inspect => CommandResponse::ok_with_data(inspect(session)),

        EditorCommand::ExportScene => {
            match serde_json::to_string_pretty(&session.scene().to_descriptors()) {
                Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(session: &mut EditorSession, json: &str) -> Result<CommandResponse, String> {
    let cmd: EditorCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(session, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    session: &mut EditorSession,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(session, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::EditorHarness;

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: EditorCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, EditorCommand::Undo));
    }

    #[test]
    fn test_command_serde_place() {
        let json = r#"{"command": "place", "item_id": "bed-01"}"#;
        let cmd: EditorCommand = serde_json::from_str(json).unwrap();
        match cmd {
            EditorCommand::Place { item_id } => assert_eq!(item_id, "bed-01"),
            _ => panic!("Expected Place"),
        }
    }

    #[test]
    fn test_command_serde_key() {
        let json = r#"{"command": "key", "key": "z", "ctrl": true}"#;
        let cmd: EditorCommand = serde_json::from_str(json).unwrap();
        match cmd {
            EditorCommand::Key { input } => {
                assert_eq!(input.key, "z");
                assert!(input.ctrl);
                assert!(!input.shift);
            }
            _ => panic!("Expected Key"),
        }
    }

    #[test]
    fn test_command_serde_set_view() {
        let json = r#"{"command": "set_view", "preset": "top"}"#;
        let cmd: EditorCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, EditorCommand::SetView { preset: ViewPreset::Top }));
    }

    #[test]
    fn test_execute_place_and_inspect() {
        let mut h = EditorHarness::new();
        let resp = execute_json(&mut h.session, r#"{"command": "place", "item_id": "desk-01"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["status"], "placed");

        let resp = execute_json(&mut h.session, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["object_count"], 1);
        assert_eq!(data["undo_len"], 1);
        assert_eq!(data["objects"][0]["item_id"], "desk-01");
    }

    #[test]
    fn test_execute_unknown_item() {
        let mut h = EditorHarness::new();
        let resp = execute_json(&mut h.session, r#"{"command": "place", "item_id": "hammock"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("hammock"));
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut h = EditorHarness::new();
        h.place("desk-01").unwrap();

        let resp = execute_json(&mut h.session, r#"{"command": "undo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["undone"], true);
        assert_eq!(h.object_count(), 0);

        let resp = execute_json(&mut h.session, r#"{"command": "redo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["redone"], true);
        assert_eq!(h.object_count(), 1);

        let resp = execute_json(&mut h.session, r#"{"command": "redo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["redone"], false);
    }

    #[test]
    fn test_execute_load_roundtrip() {
        let mut h = EditorHarness::new();
        let resp = execute_json(&mut h.session, r#"{"command": "place", "item_id": "sofa-01"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["status"], "pending");
        let ticket = data["ticket"].as_u64().unwrap();

        let resp = execute_json(&mut h.session, r#"{"command": "load_requests"}"#).unwrap();
        assert_eq!(resp.data.unwrap()[0]["path"], "models/furniture/sofa.glb");

        let cmd = format!(r#"{{"command": "complete_load", "ticket": {ticket}, "error": "404"}}"#);
        let resp = execute_json(&mut h.session, &cmd).unwrap();
        assert!(resp.success);
        assert_eq!(h.object_count(), 1);
        assert!(h.session.scene().all()[0].is_fallback);

        // Same ticket again is rejected
        let resp = execute_json(&mut h.session, &cmd).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_export_scene() {
        let mut h = EditorHarness::new();
        h.place("desk-01").unwrap();

        let resp = execute_json(&mut h.session, r#"{"command": "export_scene"}"#).unwrap();
        let data = resp.data.unwrap();
        let scene_json = data["scene_json"].as_str().unwrap();
        assert!(scene_json.contains("\"modelId\": \"desk-01\""));
    }

    #[test]
    fn test_execute_batch() {
        let mut h = EditorHarness::new();
        let batch = r#"[
            {"command": "place", "item_id": "desk-01"},
            {"command": "place", "item_id": "lamp-01"},
            {"command": "undo"}
        ]"#;
        let responses = execute_json_batch(&mut h.session, batch).unwrap();
        assert_eq!(responses.len(), 3);
        assert!(responses.iter().all(|r| r.success));
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = EditorHarness::new();
        let result = execute_json(&mut h.session, "not valid json");
        assert!(result.is_err());
    }
}
