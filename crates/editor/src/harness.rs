//! Headless harness for driving an editor session from tests and scripts.
//!
//! Uses an in-memory project store and a deferred loader, so model loads
//! only settle when the caller completes them.

use shared::{Locale, ObjectId, Project, SceneObjectDescriptor, SizeClass};

use crate::assets::{DeferredLoader, LoadTicket, ModelInfo};
use crate::catalog::Catalog;
use crate::error::{AssetError, EditorError, EditorResult};
use crate::keyboard::{KeyInput, Shortcut};
use crate::project::MemoryStore;
use crate::session::{EditorSession, Placement};
use crate::state::{EditorSettings, PlacedObject};
use crate::viewport::{InteractionOutcome, ScreenPos, Viewport};

/// Headless session opened on a fresh medium-sized project
pub struct EditorHarness {
    pub session: EditorSession,
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorHarness {
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    pub fn new() -> Self {
        Self::with_settings(Self::test_settings())
    }

    /// English notices and a fixed spawn seed
    pub fn test_settings() -> EditorSettings {
        EditorSettings {
            locale: Locale::En,
            seed: Some(7),
            ..EditorSettings::default()
        }
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let mut session = EditorSession::new(
            Catalog::builtin(),
            settings,
            Box::new(MemoryStore::new()),
            Box::new(DeferredLoader::new()),
        );
        let opened = session
            .store_mut()
            .create("Test room", SizeClass::Medium)
            .and_then(|project| session.open(project, Self::viewport()));
        if let Err(e) = opened {
            tracing::error!(error = %e, "harness project setup failed");
        }
        let mut harness = Self { session };
        harness.session.take_notices();
        harness
    }

    /// Open a project whose saved scene is `descriptors`
    pub fn with_scene(descriptors: Vec<SceneObjectDescriptor>) -> EditorResult<Self> {
        let mut harness = Self::new();
        let mut project: Project = harness
            .session
            .project()
            .cloned()
            .ok_or(EditorError::NoOpenProject)?;
        project.scene_data = Some(descriptors);
        harness.session.open(project, Self::viewport())?;
        Ok(harness)
    }

    pub fn viewport() -> Viewport {
        Viewport::new(Self::WIDTH, Self::HEIGHT)
    }

    // ── Furniture ─────────────────────────────────────────────

    /// Place an item and settle its model load successfully
    pub fn place(&mut self, item_id: &str) -> EditorResult<ObjectId> {
        match self.session.add_furniture(item_id)? {
            Placement::Placed { id } => Ok(id),
            Placement::Pending { ticket, .. } => self
                .complete_ok(ticket)?
                .ok_or(EditorError::UnknownTicket(ticket.0)),
        }
    }

    /// Place an item and leave its load in flight. None when the item
    /// was placed at once.
    pub fn place_pending(&mut self, item_id: &str) -> EditorResult<Option<(ObjectId, LoadTicket)>> {
        Ok(match self.session.add_furniture(item_id)? {
            Placement::Pending {
                placeholder,
                ticket,
            } => Some((placeholder, ticket)),
            Placement::Placed { .. } => None,
        })
    }

    pub fn complete_ok(&mut self, ticket: LoadTicket) -> EditorResult<Option<ObjectId>> {
        self.session
            .complete_load(ticket, Ok(ModelInfo::from_host(vec!["mesh".into()])))
    }

    /// Settle a load as a missing file
    pub fn complete_err(&mut self, ticket: LoadTicket) -> EditorResult<Option<ObjectId>> {
        let path = self
            .session
            .pending_path(ticket)
            .unwrap_or_default()
            .to_string();
        self.session
            .complete_load(ticket, Err(AssetError::NotFound { path }))
    }

    /// Settle every outstanding request the host was asked to perform
    pub fn complete_all_ok(&mut self) -> EditorResult<usize> {
        let requests = self.session.take_load_requests();
        let count = requests.len();
        for request in requests {
            self.complete_ok(request.ticket)?;
        }
        Ok(count)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn object_count(&self) -> usize {
        self.session.scene().len()
    }

    pub fn placeholder_count(&self) -> usize {
        self.session.scene().placeholders().len()
    }

    pub fn object(&self, id: &str) -> Option<&PlacedObject> {
        self.session.scene().get(id)
    }

    pub fn descriptors(&self) -> Vec<SceneObjectDescriptor> {
        self.session.scene().to_descriptors()
    }

    /// Where the center of an object appears on screen
    pub fn screen_pos_of(&self, id: &str) -> Option<ScreenPos> {
        let object = self.object(id)?;
        self.session
            .viewpoint()
            .camera()
            .project(object.position, self.session.viewport())
    }

    // ── Input ─────────────────────────────────────────────────

    /// Press and release on an object without moving
    pub fn click_object(&mut self, id: &str) -> InteractionOutcome {
        let Some(pos) = self.screen_pos_of(id) else {
            return InteractionOutcome::Nothing;
        };
        self.session.pointer_down(pos, 0);
        self.session.pointer_up(50)
    }

    /// Press on an object, move to `to` in `steps` moves, release
    pub fn drag_object(&mut self, id: &str, to: ScreenPos, steps: u32) -> InteractionOutcome {
        let Some(from) = self.screen_pos_of(id) else {
            return InteractionOutcome::Nothing;
        };
        self.session.pointer_down(from, 0);
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.session.pointer_move(ScreenPos::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ));
        }
        self.session.pointer_up(500)
    }

    pub fn key(&mut self, input: KeyInput) -> EditorResult<Option<Shortcut>> {
        self.session.handle_key(&input)
    }

    /// Undo until the stack is empty; returns the number of steps
    pub fn undo_all(&mut self) -> usize {
        let mut steps = 0;
        while self.session.undo() {
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_starts_in_empty_project() {
        let h = EditorHarness::new();
        assert_eq!(h.object_count(), 0);
        assert_eq!(h.session.project().unwrap().name, "Test room");
        assert!(!h.session.has_unsaved_changes());
    }

    #[test]
    fn test_place_model_less_item() {
        let mut h = EditorHarness::new();
        let id = h.place("desk-01").unwrap();
        let desk = h.object(&id).unwrap();
        assert_eq!(desk.name, "Desk");
        assert!(!desk.is_fallback);
        assert!((desk.position.y - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_place_pending_then_complete() {
        let mut h = EditorHarness::new();
        let (placeholder, ticket) = h.place_pending("bed-01").unwrap().unwrap();
        assert_eq!(h.placeholder_count(), 1);
        assert_eq!(h.object_count(), 0);
        assert!(h.object(&placeholder).is_none());

        let id = h.complete_ok(ticket).unwrap().unwrap();
        assert_eq!(h.placeholder_count(), 0);
        assert_eq!(h.object(&id).unwrap().name, "Bed");
    }

    #[test]
    fn test_complete_err_gives_fallback() {
        let mut h = EditorHarness::new();
        let (_, ticket) = h.place_pending("sofa-01").unwrap().unwrap();
        let id = h.complete_err(ticket).unwrap().unwrap();
        assert!(h.object(&id).unwrap().is_fallback);
    }

    #[test]
    fn test_placed_object_is_on_screen() {
        let mut h = EditorHarness::new();
        let id = h.place("desk-01").unwrap();
        let pos = h.screen_pos_of(&id).unwrap();
        assert!(pos.x > 0.0 && pos.x < EditorHarness::WIDTH);
        assert!(pos.y > 0.0 && pos.y < EditorHarness::HEIGHT);
    }

    #[test]
    fn test_with_scene_restores_objects() {
        let mut h = EditorHarness::new();
        h.place("desk-01").unwrap();
        h.place("lamp-01").unwrap();
        let saved = h.descriptors();

        let h2 = EditorHarness::with_scene(saved).unwrap();
        assert_eq!(h2.object_count(), 2);
        assert_eq!(h2.session.history().undo_len(), 0);
    }

    #[test]
    fn test_undo_all() {
        let mut h = EditorHarness::new();
        h.place("desk-01").unwrap();
        h.place("lamp-01").unwrap();
        h.place("tv-01").unwrap();
        assert_eq!(h.undo_all(), 3);
        assert_eq!(h.object_count(), 0);
    }
}
