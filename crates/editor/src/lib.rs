// Library crate: the headless room editor core. Rendering belongs to the
// host; it consumes `Frame`s and feeds input back through `EditorSession`.

pub mod assets;
pub mod catalog;
pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod i18n;
pub mod keyboard;
pub mod notice;
pub mod project;
pub mod session;
pub mod state;
pub mod viewport;

pub use error::{AssetError, EditorError, EditorResult};
pub use session::EditorSession;
