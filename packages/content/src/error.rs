//! Error types for content loading and validation

use crate::Language;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),
}

/// Why a document-store payload was not accepted as a LocalizedContentMap.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("Payload is not a JSON object")]
    NotAnObject,

    #[error("Missing content for language '{0}'")]
    MissingLanguage(Language),

    #[error("Content for '{language}' has the wrong shape: {message}")]
    Shape { language: Language, message: String },
}

pub type ContentResult<T> = Result<T, ContentError>;
