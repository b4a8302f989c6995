//! Error types for content sync

use crate::session::AuthError;
use folio_content::{ContentError, PayloadError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// The store's access rules refused the read
    #[error("Permission denied: {0}")]
    ChannelPermissionDenied(String),

    /// Any other subscription failure
    #[error("Channel error: {0}")]
    Channel(String),

    /// Cloud document exists but lacks a language or has the wrong shape
    #[error("Invalid cloud payload: {0}")]
    InvalidCloudPayload(#[from] PayloadError),

    #[error("Please sign in to make changes")]
    Unauthorized,

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Content has not loaded yet")]
    Loading,

    #[error("Content sync has already been started")]
    AlreadyStarted,

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

pub type SyncResult<T> = Result<T, SyncError>;
