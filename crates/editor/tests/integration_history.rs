//! Integration tests for undo/redo through the editor session.

use room_editor_lib::harness::EditorHarness;
use room_editor_lib::session::ActiveView;
use room_editor_lib::state::{EditorSettings, HistoryState, PlacedObject};
use shared::ItemKind;

/// {kind, position, rotation, scale} of every object, in order
fn transforms(h: &EditorHarness) -> Vec<(ItemKind, [f32; 3], [f32; 3], [f32; 3])> {
    h.session
        .scene()
        .all()
        .iter()
        .map(|o: &PlacedObject| {
            (
                o.kind,
                o.position.to_array(),
                o.rotation.to_array(),
                o.scale.to_array(),
            )
        })
        .collect()
}

#[test]
fn test_n_placements_then_n_undos_empty_the_room() {
    let items = ["desk-01", "lamp-01", "tv-01", "shelf-01", "sink-01", "bathtub-01"];
    for n in 1..=items.len() {
        let mut h = EditorHarness::new();
        for item in &items[..n] {
            h.place(item).unwrap();
        }
        assert_eq!(h.object_count(), n);

        for _ in 0..n {
            assert!(h.session.undo());
        }
        assert_eq!(h.object_count(), 0, "after {n} undos");
        assert!(!h.session.undo());
    }
}

#[test]
fn test_undo_then_redo_restores_transforms() {
    let mut h = EditorHarness::new();
    let desk = h.place("desk-01").unwrap();
    h.place("lamp-01").unwrap();
    h.session.select(&desk);
    h.session.set_rotation_selected(room_editor_lib::state::Axis::Y, 90.0);
    h.place("bed-01").unwrap();

    let before = transforms(&h);
    assert!(h.session.undo());
    assert_eq!(h.object_count(), 2);
    assert!(h.session.redo());
    assert_eq!(transforms(&h), before);
}

#[test]
fn test_models_restored_from_cache_on_undo() {
    let mut h = EditorHarness::new();
    h.place("bed-01").unwrap();
    h.place("desk-01").unwrap();
    h.session.undo();
    h.session.undo();
    h.session.redo();

    // Bed model was loaded once; restoring it needs no new request
    assert_eq!(h.session.pending_loads(), 0);
    let bed = &h.session.scene().all()[0];
    assert_eq!(bed.kind, ItemKind::Bed);
    assert!(!bed.visual.is_loading());
}

#[test]
fn test_undo_stack_is_bounded() {
    let mut h = EditorHarness::new();
    for _ in 0..51 {
        h.place("lamp-01").unwrap();
    }
    assert_eq!(h.session.history().undo_len(), 50);

    // The oldest snapshot (empty room) was evicted
    assert_eq!(h.undo_all(), 50);
    assert_eq!(h.object_count(), 1);
}

#[test]
fn test_custom_history_limit() {
    let settings = EditorSettings {
        history_limit: 3,
        ..EditorHarness::test_settings()
    };
    let mut h = EditorHarness::with_settings(settings);
    for _ in 0..5 {
        h.place("lamp-01").unwrap();
    }
    assert_eq!(h.session.history().undo_len(), 3);
}

#[test]
fn test_new_edit_clears_redo() {
    let mut h = EditorHarness::new();
    h.place("desk-01").unwrap();
    h.place("lamp-01").unwrap();
    h.session.undo();
    assert_eq!(h.session.history().redo_len(), 1);

    h.place("tv-01").unwrap();
    assert_eq!(h.session.history().redo_len(), 0);
    assert!(!h.session.redo());
}

#[test]
fn test_delete_and_paste_clear_redo() {
    let mut h = EditorHarness::new();
    let desk = h.place("desk-01").unwrap();
    h.place("lamp-01").unwrap();
    h.session.undo();

    h.session.select(&desk);
    assert_eq!(h.session.delete_selected(), 1);
    assert_eq!(h.session.history().redo_len(), 0);

    h.session.undo();
    let desk = h.session.scene().all()[0].id.clone();
    h.session.select(&desk);
    h.session.copy();
    h.session.undo();
    assert_eq!(h.session.history().redo_len(), 2);
    h.session.paste();
    assert_eq!(h.session.history().redo_len(), 0);
}

#[test]
fn test_bed_scenario() {
    let mut h = EditorHarness::new();
    let bed = h.place("bed-01").unwrap();
    assert_eq!(h.session.history().undo_len(), 1);

    h.session.select(&bed);
    h.session.delete_selected();
    assert_eq!(h.session.history().undo_len(), 2);
    assert_eq!(h.object_count(), 0);

    assert!(h.session.undo());
    let objects = h.session.scene().all();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].kind, ItemKind::Bed);
    assert_eq!(objects[0].dimensions.to_array(), [2.0, 0.6, 2.2]);

    assert!(h.session.undo());
    assert_eq!(h.object_count(), 0);

    assert!(h.session.redo());
    assert_eq!(h.object_count(), 1);
    assert_eq!(h.session.scene().all()[0].kind, ItemKind::Bed);

    assert!(h.session.redo());
    assert_eq!(h.object_count(), 0);
    assert!(!h.session.redo());
}

#[test]
fn test_save_keeps_stacks_and_clears_dirty() {
    let mut h = EditorHarness::new();
    h.place("desk-01").unwrap();
    assert_eq!(h.session.history().state(), HistoryState::Dirty);
    assert!(h.session.has_unsaved_changes());

    h.session.save().unwrap();
    assert_eq!(h.session.history().state(), HistoryState::Clean);
    assert!(!h.session.has_unsaved_changes());
    assert_eq!(h.session.history().undo_len(), 1);

    // Undo after save is still possible
    assert!(h.session.undo());
    assert_eq!(h.object_count(), 0);
}

#[test]
fn test_undo_after_save_guards_navigation() {
    let mut h = EditorHarness::new();
    h.place("desk-01").unwrap();
    h.session.save().unwrap();

    assert!(h.session.undo());
    assert_eq!(h.object_count(), 0);
    assert_eq!(h.session.history().state(), HistoryState::Dirty);
    assert!(h.session.has_unsaved_changes());

    let mut asked = false;
    let left = h.session.leave_editor(|_| {
        asked = true;
        false
    });
    assert!(asked);
    assert!(!left);
    assert_eq!(h.session.active_view(), ActiveView::Editor);
}

#[test]
fn test_undo_redo_on_empty_history_is_noop() {
    let mut h = EditorHarness::new();
    assert!(!h.session.undo());
    assert!(!h.session.redo());
    assert!(h.session.take_notices().is_empty());
}
