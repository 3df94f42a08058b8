//! Error types for the editing core.

use thiserror::Error;

use shared::ProjectId;

/// Failure while resolving a model asset. Always recovered locally by
/// substituting a fallback primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The asset path does not exist.
    #[error("model not found: {path}")]
    NotFound { path: String },

    /// Reading the asset failed for another reason (network, permissions).
    #[error("failed to read model {path}: {message}")]
    Io { path: String, message: String },

    /// The file is not a valid glTF / GLB container.
    #[error("failed to decode model {path}: {reason}")]
    Decode { path: String, reason: String },

    /// The model requires a decoder that is not available (e.g. Draco).
    #[error("model {path} requires unsupported extension {extension}")]
    MissingDecoder { path: String, extension: String },
}

impl AssetError {
    pub fn path(&self) -> &str {
        match self {
            AssetError::NotFound { path }
            | AssetError::Io { path, .. }
            | AssetError::Decode { path, .. }
            | AssetError::MissingDecoder { path, .. } => path,
        }
    }
}

/// Errors surfaced by the editor session and the project store.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The render target has no area; the host should retry after layout.
    #[error("viewport is zero-sized ({width}x{height})")]
    InvalidViewport { width: f32, height: f32 },

    #[error("unknown catalog item: {0}")]
    UnknownCatalogItem(String),

    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("no project is open")]
    NoOpenProject,

    #[error("unknown load ticket {0}")]
    UnknownTicket(u64),

    #[error("storage error: {0}")]
    Store(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
