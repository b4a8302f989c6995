//! File-backed document store.
//!
//! Each document lives at `<root>/<collection>/<document>.json`. Subscriptions
//! watch the collection directory and re-read the document after every
//! filesystem event, emitting only when what they read has changed.

use super::DirectoryWatcher;
use crate::channel::{
    ChannelError, ChannelErrorKind, ChannelEvent, DocumentId, DocumentStore, Snapshot, StoreError,
    Subscription,
};
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// How long an empty document file may sit before it counts as malformed
const EMPTY_SETTLE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// What a read of the document file found
#[derive(Debug, Clone, PartialEq)]
enum FileState {
    Missing,
    Content(Vec<u8>),
    Failed(ErrorKind, String),
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, id: &DocumentId) -> PathBuf {
        self.root
            .join(&id.collection)
            .join(format!("{}.json", id.document))
    }
}

async fn read_state(path: &Path) -> FileState {
    match tokio::fs::read(path).await {
        Ok(bytes) => FileState::Content(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => FileState::Missing,
        Err(e) => FileState::Failed(e.kind(), e.to_string()),
    }
}

fn to_event(state: &FileState) -> ChannelEvent {
    match state {
        FileState::Missing => ChannelEvent::Snapshot(Snapshot { payload: None }),
        FileState::Content(bytes) if bytes.is_empty() => ChannelEvent::Error(ChannelError::new(
            ChannelErrorKind::Other,
            "Malformed document: file is empty",
        )),
        FileState::Content(bytes) => match serde_json::from_slice::<Value>(bytes) {
            Ok(payload) => ChannelEvent::Snapshot(Snapshot {
                payload: Some(payload),
            }),
            Err(e) => ChannelEvent::Error(ChannelError::new(
                ChannelErrorKind::Other,
                format!("Malformed document: {}", e),
            )),
        },
        FileState::Failed(kind, message) => {
            let kind = if *kind == ErrorKind::PermissionDenied {
                ChannelErrorKind::PermissionDenied
            } else {
                ChannelErrorKind::Unavailable
            };
            ChannelEvent::Error(ChannelError::new(kind, message.clone()))
        }
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn subscribe(&self, id: &DocumentId) -> Result<Subscription, StoreError> {
        let path = self.document_path(id);
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        tokio::fs::create_dir_all(&dir).await?;

        let (fs_tx, mut fs_rx) = mpsc::unbounded_channel();
        let watcher = DirectoryWatcher::new(&dir, fs_tx)?;
        let (tx, rx) = mpsc::channel(100);

        let producer = tokio::spawn(async move {
            let _watcher = watcher;
            let mut last: Option<FileState> = None;

            loop {
                let state = read_state(&path).await;

                // A writer that truncates before writing leaves an empty file
                // briefly. Only an empty file that outlasts EMPTY_SETTLE is reported.
                let empty = matches!(&state, FileState::Content(bytes) if bytes.is_empty());
                if empty {
                    match tokio::time::timeout(EMPTY_SETTLE, fs_rx.recv()).await {
                        Ok(Some(_)) => {
                            while fs_rx.try_recv().is_ok() {}
                            continue;
                        }
                        Ok(None) => break,
                        Err(_) => {}
                    }
                }

                if last.as_ref() != Some(&state) {
                    if tx.send(to_event(&state)).await.is_err() {
                        break;
                    }
                    last = Some(state);
                }

                if fs_rx.recv().await.is_none() {
                    break;
                }
                // Collapse a burst of events into one re-read
                while fs_rx.try_recv().is_ok() {}
            }
        });

        Ok(Subscription::new(rx, producer))
    }

    async fn set(&self, id: &DocumentId, value: Value) -> Result<(), StoreError> {
        let path = self.document_path(id);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        // Write beside the target then rename, so readers never see a partial document
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, serde_json::to_vec_pretty(&value)?).await?;
        tokio::fs::rename(&staging, &path).await?;

        tracing::debug!(path = %path.display(), "Wrote document");
        Ok(())
    }
}
