//! The editor session: explicit application context owning every piece of
//! editor state. Hosts (browser binding, CLI, tests) drive it through these
//! methods and never touch the parts directly.

use chrono::Utc;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::{CatalogItem, Locale, ObjectId, Project, SizeClass};

use crate::assets::{
    AssetResolver, BoxPrimitive, LoadRequest, LoadTarget, LoadTicket, ModelInfo, ModelLoader,
    Settled, Visual,
};
use crate::catalog::Catalog;
use crate::error::{AssetError, EditorError, EditorResult};
use crate::keyboard::{shortcut_for, KeyInput, Shortcut};
use crate::notice::{Notice, NoticeLevel, NoticeQueue};
use crate::project::{KeyValueStore, ProjectStore};
use crate::state::{
    object_label, Axis, Clipboard, EditHistory, EditorSettings, LoadingPlaceholder, SceneChange,
    SceneState,
};
use crate::viewport::picking::ray_horizontal_plane;
use crate::viewport::{
    Frame, InteractionController, InteractionOutcome, PointerTarget, ScreenPos, ViewPreset,
    Viewport, ViewpointController,
};

/// Which page the host is showing; shortcuts only act in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    Projects,
    Editor,
}

/// Result of asking for a new piece of furniture
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Placement {
    /// In the scene right away (cached or model-less item)
    Placed { id: ObjectId },
    /// Placeholder shown until the model settles
    Pending {
        placeholder: ObjectId,
        ticket: LoadTicket,
    },
}

pub struct EditorSession {
    catalog: Catalog,
    settings: EditorSettings,
    scene: SceneState,
    history: EditHistory,
    interaction: InteractionController,
    viewpoint: ViewpointController,
    assets: AssetResolver,
    clipboard: Clipboard,
    notices: NoticeQueue,
    store: ProjectStore<Box<dyn KeyValueStore>>,
    project: Option<Project>,
    viewport: Viewport,
    view: ActiveView,
}

impl EditorSession {
    pub fn new(
        catalog: Catalog,
        settings: EditorSettings,
        store: Box<dyn KeyValueStore>,
        loader: Box<dyn ModelLoader>,
    ) -> Self {
        Self {
            catalog,
            scene: SceneState::new(settings.spawn_spread, settings.seed),
            history: EditHistory::new(settings.history_limit),
            interaction: InteractionController::new(
                settings.drag_threshold_px,
                settings.click_max_ms,
            ),
            viewpoint: ViewpointController::new(settings.transition_secs),
            assets: AssetResolver::new(loader),
            clipboard: Clipboard::default(),
            notices: NoticeQueue::new(settings.locale, settings.notice_ms),
            store: ProjectStore::new(store),
            project: None,
            viewport: Viewport::new(1.0, 1.0),
            view: ActiveView::Projects,
            settings,
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn viewpoint(&self) -> &ViewpointController {
        &self.viewpoint
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn store(&self) -> &ProjectStore<Box<dyn KeyValueStore>> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProjectStore<Box<dyn KeyValueStore>> {
        &mut self.store
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn active_view(&self) -> ActiveView {
        self.view
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.history.has_unsaved_changes()
    }

    pub fn pending_loads(&self) -> usize {
        self.assets.pending_len()
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.settings.locale = locale;
        self.notices.set_locale(locale);
    }

    fn display_name(&self, item: &CatalogItem) -> String {
        item.display_name(self.settings.locale).to_string()
    }

    // ── Project lifecycle ───────────────────────────────────

    /// Load `project` into the editor. Fails without touching any state
    /// when the viewport has no area.
    pub fn open(&mut self, project: Project, viewport: Viewport) -> EditorResult<()> {
        if !viewport.is_valid() {
            return Err(EditorError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        self.store.set_current(&project)?;

        self.interaction.cancel();
        self.viewpoint.set_controls_enabled(true);
        self.viewpoint.snap_to(ViewPreset::Isometric);
        self.scene.clear_placeholders();
        self.scene.set_size_class(project.size);
        self.history.reset();

        let descriptors = project.scene_data.clone().unwrap_or_default();
        self.scene.restore(&descriptors, &self.catalog, &mut self.assets);
        tracing::info!(
            id = project.id,
            name = %project.name,
            objects = descriptors.len(),
            "project opened"
        );
        self.project = Some(project);
        self.viewport = viewport;
        self.view = ActiveView::Editor;
        Ok(())
    }

    /// Reopen whatever is stored as the current project
    pub fn open_current(&mut self, viewport: Viewport) -> EditorResult<()> {
        let project = self.store.current()?.ok_or(EditorError::NoOpenProject)?;
        self.open(project, viewport)
    }

    pub fn resize(&mut self, viewport: Viewport) -> EditorResult<()> {
        if !viewport.is_valid() {
            return Err(EditorError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    /// Persist the scene into the open project
    pub fn save(&mut self) -> EditorResult<()> {
        let project = self.project.as_mut().ok_or(EditorError::NoOpenProject)?;
        project.last_modified = Some(Utc::now().to_rfc3339());
        project.scene_data = Some(self.scene.to_descriptors());

        self.store.set_current(project)?;
        if !self.store.update(project)? {
            tracing::debug!(id = project.id, "project not in list, saved as current only");
        }
        tracing::info!(id = project.id, objects = project.object_count(), "project saved");

        self.history.mark_saved();
        self.notices.push_key("project.saved", NoticeLevel::Success);
        Ok(())
    }

    /// Navigation guard. `confirm` is only asked when there are unsaved
    /// changes; declining keeps the editor open and changes nothing.
    pub fn leave_editor(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if self.has_unsaved_changes() {
            let message = crate::i18n::t(self.notices.locale(), "project.unsaved");
            if !confirm(message) {
                tracing::debug!("leave cancelled");
                return false;
            }
        }
        self.interaction.cancel();
        self.viewpoint.set_controls_enabled(true);
        self.view = ActiveView::Projects;
        true
    }

    /// Change the room size of the open project
    pub fn set_size_class(&mut self, size: SizeClass) {
        self.scene.set_size_class(size);
        if let Some(project) = self.project.as_mut() {
            project.size = size;
        }
    }

    pub fn toggle_favorite(&mut self, id: shared::ProjectId) -> EditorResult<bool> {
        let favorite = self.store.toggle_favorite(id)?;
        let key = if favorite {
            "project.favorite_on"
        } else {
            "project.favorite_off"
        };
        self.notices.push_key(key, NoticeLevel::Success);
        Ok(favorite)
    }

    // ── Furniture ───────────────────────────────────────────

    /// Add a catalog item. Items whose model is loaded or that have no
    /// model appear at once; others get a loading placeholder. A model that
    /// failed before is requested again for the new placement.
    pub fn add_furniture(&mut self, item_id: &str) -> EditorResult<Placement> {
        let item = self
            .catalog
            .get(item_id)
            .cloned()
            .ok_or_else(|| EditorError::UnknownCatalogItem(item_id.to_string()))?;
        let name = self.display_name(&item);

        let visual = match item.asset_path() {
            None => Visual::Primitive(BoxPrimitive::solid(&item)),
            Some(path) => match self.assets.cached(path) {
                Some(Ok(model)) => Visual::Model(model.clone()),
                Some(Err(_)) | None => return Ok(self.place_pending(&item, path)),
            },
        };

        self.history.snapshot(&self.scene);
        let id = self.scene.place(&item, &name, visual);
        self.notices.push_key("asset.added", NoticeLevel::Success);
        tracing::info!(item = %item.id, %id, "furniture placed");
        Ok(Placement::Placed { id })
    }

    fn place_pending(&mut self, item: &CatalogItem, path: &str) -> Placement {
        let (x, z) = self.scene.spawn_point();
        let placeholder = uuid::Uuid::new_v4().to_string();
        let ticket = self.assets.request(
            path,
            &item.id,
            LoadTarget::Placement {
                placeholder: placeholder.clone(),
            },
        );
        self.scene.add_placeholder(LoadingPlaceholder {
            id: placeholder.clone(),
            item_id: item.id.clone(),
            ticket,
            position: Vec3::new(x, item.size.half_height() as f32, z),
            primitive: BoxPrimitive::placeholder(item.size),
        });
        self.notices.push_key("asset.loading", NoticeLevel::Info);
        tracing::info!(item = %item.id, ticket = ticket.0, "furniture pending model load");
        Placement::Pending {
            placeholder,
            ticket,
        }
    }

    /// Report the outcome of a host-performed load. Returns the object
    /// that received the model, or None when the target is gone.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ModelInfo, AssetError>,
    ) -> EditorResult<Option<ObjectId>> {
        let settled = self.assets.settle(ticket, result)?;
        Ok(self.apply_settled(settled))
    }

    fn apply_settled(&mut self, settled: Settled) -> Option<ObjectId> {
        let failed = settled.result.is_err();
        let item = self.catalog.get(&settled.item_id).cloned();

        let id = match settled.target {
            LoadTarget::Placement { placeholder } => {
                let Some(ph) = self.scene.take_placeholder(&placeholder) else {
                    tracing::debug!(ticket = settled.ticket.0, "stale load for removed placeholder");
                    return None;
                };
                let item = item?;
                let name = self.display_name(&item);
                let visual = Visual::for_result(&item, &settled.result);
                self.history.snapshot(&self.scene);
                let id = self
                    .scene
                    .place_at(&item, &name, ph.position.x, ph.position.z, visual);
                if !failed {
                    self.notices.push_key("asset.added", NoticeLevel::Success);
                }
                id
            }
            LoadTarget::Refresh { object } => {
                let loading = self
                    .scene
                    .get(&object)
                    .map(|o| o.visual.is_loading())
                    .unwrap_or(false);
                if !loading {
                    tracing::debug!(ticket = settled.ticket.0, %object, "stale load for replaced object");
                    return None;
                }
                let item = item?;
                let visual = Visual::for_result(&item, &settled.result);
                self.scene.set_visual(&object, visual, failed);
                object
            }
        };

        if failed {
            self.notices.push_key("asset.fallback", NoticeLevel::Warning);
        }
        Some(id)
    }

    /// Settle whatever the loader finished since the last call
    fn poll_loads(&mut self) {
        for settled in self.assets.poll() {
            self.apply_settled(settled);
        }
    }

    /// Block until every outstanding load has settled (headless replay)
    pub fn flush_loads(&mut self) {
        for settled in self.assets.wait() {
            self.apply_settled(settled);
        }
    }

    pub fn take_load_requests(&mut self) -> Vec<LoadRequest> {
        self.assets.drain_requests()
    }

    pub fn pending_path(&self, ticket: LoadTicket) -> Option<&str> {
        self.assets.pending_path(ticket)
    }

    pub fn delete_selected(&mut self) -> usize {
        if self.scene.selected_ids().is_empty() {
            return 0;
        }
        self.history.snapshot(&self.scene);
        let removed = self.scene.remove_selected();
        if self.interaction.cancel() {
            self.viewpoint.set_controls_enabled(true);
        }
        for object in &removed {
            tracing::info!(object = %object_label(object), "deleted");
        }
        self.notices.push_key("edit.deleted", NoticeLevel::Info);
        removed.len()
    }

    /// Copy selected objects; returns how many were copied
    pub fn copy(&mut self) -> usize {
        let copied: Vec<_> = self
            .scene
            .selected()
            .into_iter()
            .map(|o| o.to_descriptor())
            .collect();
        let count = copied.len();
        if count > 0 {
            self.clipboard.set(copied);
            self.notices.push_key("edit.copied", NoticeLevel::Info);
        }
        count
    }

    /// Paste the clipboard next to the originals. The pasted objects
    /// become the selection.
    pub fn paste(&mut self) -> Vec<ObjectId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        self.history.snapshot(&self.scene);

        let offset = self.settings.paste_offset as f64;
        let entries = self.clipboard.entries().to_vec();
        let pasted: Vec<ObjectId> = entries
            .into_iter()
            .map(|mut desc| {
                desc.uuid = uuid::Uuid::new_v4().to_string();
                desc.position.x += offset;
                desc.position.z += offset;
                self.scene.rebuild(&desc, &self.catalog, &mut self.assets)
            })
            .collect();

        self.scene.clear_selection();
        for id in &pasted {
            self.scene.extend_selection(id);
        }
        self.notices.push_key("edit.pasted", NoticeLevel::Info);
        pasted
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.scene.select(id)
    }

    pub fn extend_selection(&mut self, id: &str) -> bool {
        self.scene.extend_selection(id)
    }

    pub fn clear_selection(&mut self) {
        self.scene.clear_selection();
    }

    /// Set a rotation component (degrees) on the selection; not undoable
    pub fn set_rotation_selected(&mut self, axis: Axis, degrees: f32) -> usize {
        self.scene.set_rotation_selected(axis, degrees)
    }

    // ── History ─────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        if self.interaction.cancel() {
            self.viewpoint.set_controls_enabled(true);
        }
        let done = self
            .history
            .undo(&mut self.scene, &self.catalog, &mut self.assets);
        if done {
            self.notices.push_key("history.undo", NoticeLevel::Info);
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        if self.interaction.cancel() {
            self.viewpoint.set_controls_enabled(true);
        }
        let done = self
            .history
            .redo(&mut self.scene, &self.catalog, &mut self.assets);
        if done {
            self.notices.push_key("history.redo", NoticeLevel::Info);
        }
        done
    }

    // ── Input ───────────────────────────────────────────────

    /// Run the shortcut bound to `input`, if any. Ignored outside the editor.
    pub fn handle_key(&mut self, input: &KeyInput) -> EditorResult<Option<Shortcut>> {
        if self.view != ActiveView::Editor {
            return Ok(None);
        }
        let Some(shortcut) = shortcut_for(input) else {
            return Ok(None);
        };
        match shortcut {
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
            Shortcut::Save => self.save()?,
            Shortcut::DeleteSelected => {
                self.delete_selected();
            }
            Shortcut::Copy => {
                self.copy();
            }
            Shortcut::Paste => {
                self.paste();
            }
            Shortcut::ResetView => self.reset_view(),
            Shortcut::View(preset) => self.set_view_preset(preset),
        }
        Ok(Some(shortcut))
    }

    pub fn pointer_down(&mut self, pos: ScreenPos, time_ms: u64) -> InteractionOutcome {
        // A press while still dragging means the host lost the release
        if self.interaction.cancel() {
            tracing::debug!("drag interrupted by a new press");
            self.viewpoint.set_controls_enabled(true);
        }
        let ray = self.viewpoint.camera().screen_ray(pos, self.viewport);
        let target = self.scene.pick(&ray).and_then(|id| {
            let object = self.scene.get(&id)?;
            let grab_offset = ray_horizontal_plane(&ray, 0.0)
                .map(|hit| Vec3::new(hit.x - object.position.x, 0.0, hit.z - object.position.z))
                .unwrap_or(Vec3::ZERO);
            Some(PointerTarget {
                object: id,
                grab_offset,
            })
        });

        let outcome = self.interaction.pointer_down(target, pos, time_ms);
        if let InteractionOutcome::Armed(id) = &outcome {
            self.scene.select(id);
        }
        outcome
    }

    pub fn pointer_move(&mut self, pos: ScreenPos) -> InteractionOutcome {
        let outcome = self.interaction.pointer_move(pos);
        if let InteractionOutcome::Drag {
            object,
            grab_offset,
            started,
        } = &outcome
        {
            if *started {
                self.viewpoint.set_controls_enabled(false);
            }
            let ray = self.viewpoint.camera().screen_ray(pos, self.viewport);
            let target = match ray_horizontal_plane(&ray, 0.0) {
                Some(hit) => Some(hit - *grab_offset),
                None => self.scene.get(object).map(|o| o.position),
            };
            let moved = target
                .map(|p| self.scene.drag_to(object, p.x, p.z))
                .unwrap_or(false);
            if !moved {
                // Dragged object vanished (undo or delete mid-drag)
                self.interaction.cancel();
                self.viewpoint.set_controls_enabled(true);
                return InteractionOutcome::Nothing;
            }
        }
        outcome
    }

    pub fn pointer_up(&mut self, time_ms: u64) -> InteractionOutcome {
        let outcome = self.interaction.pointer_up(time_ms);
        self.viewpoint.set_controls_enabled(true);
        outcome
    }

    /// Orbit input from the host; false when ignored
    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) -> bool {
        self.viewpoint.orbit(d_azimuth, d_polar)
    }

    pub fn zoom(&mut self, factor: f32) -> bool {
        self.viewpoint.zoom(factor)
    }

    // ── Camera ──────────────────────────────────────────────

    pub fn set_view_preset(&mut self, preset: ViewPreset) {
        self.interaction.cancel();
        self.viewpoint.set_controls_enabled(true);
        self.viewpoint.set_preset(preset);
        self.notices.push_key(preset.notice_key(), NoticeLevel::Info);
    }

    pub fn reset_view(&mut self) {
        self.interaction.cancel();
        self.viewpoint.set_controls_enabled(true);
        self.viewpoint.set_preset(ViewPreset::Isometric);
        self.notices.push_key("view.reset", NoticeLevel::Info);
    }

    // ── Frame output ────────────────────────────────────────

    /// Advance time: settle finished loads and camera transitions
    pub fn tick(&mut self, dt: f32) -> Frame {
        self.poll_loads();
        self.viewpoint.tick(dt);
        self.frame()
    }

    pub fn frame(&self) -> Frame {
        Frame::build(
            &self.scene,
            self.viewpoint.camera(),
            self.viewport,
            self.settings.grid_density,
            self.viewpoint.controls_enabled(),
            self.viewpoint.is_transitioning(),
        )
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        self.scene.drain_changes()
    }
}
