pub mod clipboard;
pub mod scene;
pub mod settings;

pub use clipboard::Clipboard;
pub use scene::{
    object_label, short_id, Axis, EditHistory, HistorySnapshot, HistoryState, LoadingPlaceholder,
    NodeTag, PlacedObject, SceneChange, SceneState,
};
pub use settings::EditorSettings;
