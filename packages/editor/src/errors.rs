//! Error types for the editor.

use pagecraft_document::AdminRole;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Path error: {0}")]
    Path(#[from] crate::path::PathError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Permission denied: role {role:?} may not {action}")]
    PermissionDenied {
        role: AdminRole,
        action: &'static str,
    },

    #[error("Persistence failure: {0}")]
    Persistence(#[from] crate::capabilities::PersistenceError),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image capability error: {0}")]
    Image(String),

    #[error("Not in editing mode")]
    NotEditing,
}
