//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Path error: {0}")]
    Path(#[from] crate::path::PathError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
