use shared::SceneObjectDescriptor;

/// Copied objects, stored as descriptors so pasting survives deletion of
/// the originals
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entries: Vec<SceneObjectDescriptor>,
}

impl Clipboard {
    pub fn set(&mut self, entries: Vec<SceneObjectDescriptor>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[SceneObjectDescriptor] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
