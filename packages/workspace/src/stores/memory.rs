//! In-process document store with live notification.
//!
//! Also records every write and can be told to refuse reads or writes, which
//! is what the sync tests use to drive each resolver path.

use crate::channel::{
    ChannelError, ChannelEvent, DocumentId, DocumentStore, Snapshot, StoreError, Subscription,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, watch};

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<DocumentId, watch::Sender<Option<Value>>>,
    writes: Vec<(DocumentId, Value)>,
    read_failure: Option<ChannelError>,
    write_failure: Option<String>,
}

impl Inner {
    fn document(&mut self, id: &DocumentId) -> &watch::Sender<Option<Value>> {
        self.documents
            .entry(id.clone())
            .or_insert_with(|| watch::channel(None).0)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change a document as another client would; not counted as a write
    pub fn put(&self, id: &DocumentId, value: Value) {
        self.lock().document(id).send_replace(Some(value));
    }

    /// Delete a document; subscribers see a non-existent snapshot
    pub fn remove(&self, id: &DocumentId) {
        self.lock().document(id).send_replace(None);
    }

    pub fn get(&self, id: &DocumentId) -> Option<Value> {
        self.lock()
            .documents
            .get(id)
            .and_then(|doc| doc.borrow().clone())
    }

    /// Make later subscriptions fail with `error`
    pub fn fail_reads(&self, error: ChannelError) {
        self.lock().read_failure = Some(error);
    }

    /// Make later writes fail with `message`
    pub fn fail_writes(&self, message: impl Into<String>) {
        self.lock().write_failure = Some(message.into());
    }

    /// Every successful `set`, in order
    pub fn writes(&self) -> Vec<(DocumentId, Value)> {
        self.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn subscribe(&self, id: &DocumentId) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel(100);

        let (read_failure, mut document) = {
            let mut inner = self.lock();
            let failure = inner.read_failure.clone();
            (failure, inner.document(id).subscribe())
        };

        let producer = tokio::spawn(async move {
            if let Some(error) = read_failure {
                let _ = tx.send(ChannelEvent::Error(error)).await;
                return;
            }

            loop {
                let payload = document.borrow_and_update().clone();
                if tx.send(ChannelEvent::Snapshot(Snapshot { payload })).await.is_err() {
                    break;
                }
                if document.changed().await.is_err() {
                    break;
                }
            }
        });

        Ok(Subscription::new(rx, producer))
    }

    async fn set(&self, id: &DocumentId, value: Value) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if let Some(message) = &inner.write_failure {
            return Err(StoreError::Unavailable(message.clone()));
        }

        inner.writes.push((id.clone(), value.clone()));
        inner.document(id).send_replace(Some(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelErrorKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscription_sees_initial_and_later_state() {
        let store = MemoryStore::new();
        let id = DocumentId::default();

        let mut subscription = store.subscribe(&id).await.unwrap();
        assert_eq!(
            subscription.next().await,
            Some(ChannelEvent::Snapshot(Snapshot { payload: None }))
        );

        store.set(&id, json!({ "en": {} })).await.unwrap();
        assert_eq!(
            subscription.next().await,
            Some(ChannelEvent::Snapshot(Snapshot {
                payload: Some(json!({ "en": {} }))
            }))
        );
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_put_is_not_counted_as_write() {
        let store = MemoryStore::new();
        let id = DocumentId::default();

        store.put(&id, json!({ "a": 1 }));
        assert_eq!(store.get(&id), Some(json!({ "a": 1 })));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_read_failure_is_delivered_as_event() {
        let store = MemoryStore::new();
        store.fail_reads(ChannelError::new(ChannelErrorKind::PermissionDenied, "rules"));

        let mut subscription = store.subscribe(&DocumentId::default()).await.unwrap();
        match subscription.next().await {
            Some(ChannelEvent::Error(e)) => assert_eq!(e.kind, ChannelErrorKind::PermissionDenied),
            other => panic!("Expected channel error, got {:?}", other),
        }
        assert_eq!(subscription.next().await, None);
    }

    #[tokio::test]
    async fn test_write_failure_leaves_document_alone() {
        let store = MemoryStore::new();
        let id = DocumentId::default();
        store.put(&id, json!({ "v": 1 }));
        store.fail_writes("offline");

        assert!(store.set(&id, json!({ "v": 2 })).await.is_err());
        assert_eq!(store.get(&id), Some(json!({ "v": 1 })));
        assert_eq!(store.write_count(), 0);
    }
}
