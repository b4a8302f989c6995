//! # Remote Content Channel
//!
//! One live subscription to one named document. A store pushes a
//! [`ChannelEvent`] for the initial state and for every later change; the
//! subscription stays open until it is closed or dropped.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Collection + document address of the content document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId {
    pub collection: String,
    pub document: String,
}

impl DocumentId {
    pub fn new(collection: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            document: document.into(),
        }
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new("portfolio", "main_content")
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.document)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Snapshot(Snapshot),
    Error(ChannelError),
}

/// Full current state of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// `None` if the document has never been written
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelErrorKind {
    /// The store's access rules refused the read
    PermissionDenied,
    /// The store could not be reached
    Unavailable,
    Other,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind:?}: {message}")]
pub struct ChannelError {
    pub kind: ChannelErrorKind,
    pub message: String,
}

impl ChannelError {
    pub fn new(kind: ChannelErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Watcher error: {0}")]
    Watcher(#[from] crate::stores::WatcherError),
}

impl StoreError {
    pub fn kind(&self) -> ChannelErrorKind {
        match self {
            StoreError::PermissionDenied(_) => ChannelErrorKind::PermissionDenied,
            StoreError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                ChannelErrorKind::PermissionDenied
            }
            StoreError::Unavailable(_) => ChannelErrorKind::Unavailable,
            _ => ChannelErrorKind::Other,
        }
    }
}

impl From<&StoreError> for ChannelError {
    fn from(e: &StoreError) -> Self {
        ChannelError::new(e.kind(), e.to_string())
    }
}

/// Backing document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open a live subscription; the first event describes the current state
    async fn subscribe(&self, id: &DocumentId) -> Result<Subscription, StoreError>;

    /// Replace the whole document. Never merges.
    async fn set(&self, id: &DocumentId, value: Value) -> Result<(), StoreError>;
}

/// Receiving end of a document subscription.
///
/// Owns the task producing its events; closing or dropping the subscription
/// stops that task.
pub struct Subscription {
    events: mpsc::Receiver<ChannelEvent>,
    producer: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn new(events: mpsc::Receiver<ChannelEvent>, producer: JoinHandle<()>) -> Self {
        Self {
            events,
            producer: Some(producer),
        }
    }

    /// Next event, or `None` once the producer has stopped
    pub async fn next(&mut self) -> Option<ChannelEvent> {
        self.events.recv().await
    }

    pub fn close(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
        self.events.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}
