//! Undo/redo functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::SceneObjectDescriptor;

use super::SceneState;
use crate::assets::AssetResolver;
use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryState {
    #[default]
    Clean,
    Dirty,
}

/// Serialized scene at one point in time. Holds descriptors only, never
/// live objects.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub timestamp: DateTime<Utc>,
    pub objects: Vec<SceneObjectDescriptor>,
}

impl HistorySnapshot {
    fn capture(scene: &SceneState) -> Self {
        Self {
            timestamp: Utc::now(),
            objects: scene.to_descriptors(),
        }
    }
}

/// Bounded undo stack plus redo stack
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<HistorySnapshot>,
    redo_stack: Vec<HistorySnapshot>,
    limit: usize,
    state: HistoryState,
    /// A save happened since the project was opened
    saved: bool,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(50)
    }
}

impl EditHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
            state: HistoryState::Clean,
            saved: false,
        }
    }

    /// Record the scene before a mutation
    pub fn snapshot(&mut self, scene: &SceneState) {
        self.undo_stack.push(HistorySnapshot::capture(scene));
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.state = HistoryState::Dirty;
    }

    /// Undo last change. False when there is nothing to undo.
    pub fn undo(
        &mut self,
        scene: &mut SceneState,
        catalog: &Catalog,
        assets: &mut AssetResolver,
    ) -> bool {
        let Some(prev) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(HistorySnapshot::capture(scene));
        scene.restore(&prev.objects, catalog, assets);
        self.state = HistoryState::Dirty;
        true
    }

    /// Redo last undone change. False when there is nothing to redo.
    pub fn redo(
        &mut self,
        scene: &mut SceneState,
        catalog: &Catalog,
        assets: &mut AssetResolver,
    ) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(HistorySnapshot::capture(scene));
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
        scene.restore(&next.objects, catalog, assets);
        self.state = HistoryState::Dirty;
        true
    }

    /// Forget everything (new project opened)
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.state = HistoryState::Clean;
        self.saved = false;
    }

    /// Saved; the stacks are kept
    pub fn mark_saved(&mut self) {
        self.state = HistoryState::Clean;
        self.saved = true;
    }

    /// Dirty with undoable edits, or moved away from a save by undo/redo
    pub fn has_unsaved_changes(&self) -> bool {
        self.state == HistoryState::Dirty && (!self.undo_stack.is_empty() || self.saved)
    }

    pub fn state(&self) -> HistoryState {
        self.state
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Most recent undo snapshot
    pub fn last_snapshot(&self) -> Option<&HistorySnapshot> {
        self.undo_stack.last()
    }
}
