//! Project persistence over a string key-value store.

mod store;

pub use store::{ProjectStore, CURRENT_PROJECT_KEY, PROJECTS_KEY};

use std::collections::HashMap;

use crate::error::EditorResult;

/// String key-value storage: browser local storage, a directory of files,
/// or memory.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> EditorResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> EditorResult<()>;
    fn remove(&mut self, key: &str) -> EditorResult<()>;
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &str) -> EditorResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> EditorResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> EditorResult<()> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EditorResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EditorResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> EditorResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::path::{Path, PathBuf};

    use super::KeyValueStore;
    use crate::error::EditorResult;

    /// One `<key>.json` file per key
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// Store under the platform data directory
        pub fn default_location() -> Option<Self> {
            directories::ProjectDirs::from("com", "roomeditor", "room-editor")
                .map(|dirs| Self::new(dirs.data_dir().join("store")))
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path(&self, key: &str) -> PathBuf {
            let safe: String = key
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                .collect();
            self.dir.join(format!("{safe}.json"))
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> EditorResult<Option<String>> {
            match std::fs::read_to_string(self.path(key)) {
                Ok(s) => Ok(Some(s)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> EditorResult<()> {
            std::fs::create_dir_all(&self.dir)?;
            std::fs::write(self.path(key), value)?;
            Ok(())
        }

        fn remove(&mut self, key: &str) -> EditorResult<()> {
            match std::fs::remove_file(self.path(key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn file_store_roundtrip() {
            let dir = std::env::temp_dir().join(format!("room-editor-store-{}", uuid::Uuid::new_v4()));
            let mut store = FileStore::new(&dir);
            assert_eq!(store.get("projects").unwrap(), None);
            store.set("projects", "[]").unwrap();
            assert_eq!(store.get("projects").unwrap().as_deref(), Some("[]"));
            assert!(dir.join("projects.json").exists());
            store.remove("projects").unwrap();
            store.remove("projects").unwrap();
            assert_eq!(store.get("projects").unwrap(), None);
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
