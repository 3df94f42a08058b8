use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::DeserializeOwned;
use shared::{Project, ProjectId, SizeClass};

use super::KeyValueStore;
use crate::error::{EditorError, EditorResult};

pub const PROJECTS_KEY: &str = "projects";
pub const CURRENT_PROJECT_KEY: &str = "currentProject";
/// Unparseable project list, kept aside before it is overwritten
pub const PROJECTS_BACKUP_KEY: &str = "projectsCorrupt";

/// Thumbnail backgrounds for the project list
const CARD_GRADIENTS: [&str; 6] = [
    "linear-gradient(45deg, #667eea, #764ba2)",
    "linear-gradient(45deg, #f093fb, #f5576c)",
    "linear-gradient(45deg, #4facfe, #00f2fe)",
    "linear-gradient(45deg, #43e97b, #38f9d7)",
    "linear-gradient(45deg, #ff6b6b, #4ecdc4)",
    "linear-gradient(45deg, #45b7d1, #96ceb4)",
];

/// Project list plus the "current project" slot
pub struct ProjectStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> ProjectStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Read and parse a key; corrupt JSON is logged and treated as absent
    fn read<T: DeserializeOwned>(&self, key: &str) -> EditorResult<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring corrupt stored value");
                Ok(None)
            }
        }
    }

    /// Project list for a read-modify-write. A corrupt stored list is copied
    /// to `PROJECTS_BACKUP_KEY` first so the write does not destroy it.
    fn list_for_write(&mut self) -> EditorResult<Vec<Project>> {
        let Some(raw) = self.kv.get(PROJECTS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(projects) => Ok(projects),
            Err(e) => {
                tracing::warn!(error = %e, backup = PROJECTS_BACKUP_KEY, "backing up corrupt project list");
                self.kv.set(PROJECTS_BACKUP_KEY, &raw)?;
                Ok(Vec::new())
            }
        }
    }

    fn write_list(&mut self, projects: &[Project]) -> EditorResult<()> {
        let json = serde_json::to_string(projects)?;
        self.kv.set(PROJECTS_KEY, &json)
    }

    pub fn list(&self) -> EditorResult<Vec<Project>> {
        Ok(self.read(PROJECTS_KEY)?.unwrap_or_default())
    }

    pub fn get(&self, id: ProjectId) -> EditorResult<Option<Project>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Create and append a new empty project
    pub fn create(&mut self, name: &str, size: SizeClass) -> EditorResult<Project> {
        let mut projects = self.list_for_write()?;
        let now = Utc::now();
        let mut id = now.timestamp_millis().max(0) as ProjectId;
        while projects.iter().any(|p| p.id == id) {
            id += 1;
        }
        let mut rng = StdRng::seed_from_u64(id);
        let project = Project {
            id,
            name: name.to_string(),
            size,
            date: now.format("%Y-%m-%d").to_string(),
            favorite: false,
            last_modified: None,
            color: Some(CARD_GRADIENTS[rng.gen_range(0..CARD_GRADIENTS.len())].to_string()),
            scene_data: None,
        };
        projects.push(project.clone());
        self.write_list(&projects)?;
        tracing::info!(id, name, size = size.as_str(), "project created");
        Ok(project)
    }

    /// Replace the stored record with the same id. False if there is none.
    pub fn update(&mut self, project: &Project) -> EditorResult<bool> {
        let mut projects = self.list_for_write()?;
        let Some(slot) = projects.iter_mut().find(|p| p.id == project.id) else {
            return Ok(false);
        };
        *slot = project.clone();
        self.write_list(&projects)?;
        Ok(true)
    }

    /// Flip the favorite flag; returns the new value
    pub fn toggle_favorite(&mut self, id: ProjectId) -> EditorResult<bool> {
        let mut project = self.get(id)?.ok_or(EditorError::ProjectNotFound(id))?;
        project.favorite = !project.favorite;
        self.update(&project)?;
        Ok(project.favorite)
    }

    pub fn current(&self) -> EditorResult<Option<Project>> {
        self.read(CURRENT_PROJECT_KEY)
    }

    pub fn set_current(&mut self, project: &Project) -> EditorResult<()> {
        let json = serde_json::to_string(project)?;
        self.kv.set(CURRENT_PROJECT_KEY, &json)
    }

    pub fn clear_current(&mut self) -> EditorResult<()> {
        self.kv.remove(CURRENT_PROJECT_KEY)
    }
}
