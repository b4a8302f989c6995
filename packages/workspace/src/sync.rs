//! # Content Sync
//!
//! Wires the channel, resolver, session manager and gateway together. Every
//! collaborator is passed in; nothing here reaches for a global client.
//!
//! ```text
//! DocumentStore ──subscribe──> ContentResolver ──> readers / Draft (open)
//!       ↑                                              │
//!       └──────────── PersistenceGateway <── save ─────┘
//! ```

use crate::channel::{ChannelError, ChannelEvent, DocumentId, DocumentStore};
use crate::error::{SyncError, SyncResult};
use crate::gateway::{Confirm, PersistenceGateway, ResetOutcome};
use crate::resolver::{ContentResolver, ResolvedContent, Resolution};
use crate::session::{IdentityProvider, SessionManager};
use folio_content::{ContentTree, Language, LocalDefaults};
use folio_editor::Draft;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    pub document: DocumentId,
    pub default_language: Language,
}

enum Lifecycle {
    Idle,
    Running(Option<JoinHandle<()>>),
    Stopped,
}

pub struct ContentSync {
    store: Arc<dyn DocumentStore>,
    document: DocumentId,
    resolver: Arc<ContentResolver>,
    sessions: SessionManager,
    gateway: PersistenceGateway,
    language: watch::Sender<Language>,
    lifecycle: Mutex<Lifecycle>,
}

impl ContentSync {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        defaults: LocalDefaults,
        config: SyncConfig,
    ) -> Self {
        Self {
            resolver: Arc::new(ContentResolver::new(&defaults)),
            sessions: SessionManager::new(identity),
            gateway: PersistenceGateway::new(store.clone(), config.document.clone(), defaults),
            store,
            document: config.document,
            language: watch::channel(config.default_language).0,
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    /// Subscribe to the content document. Only ever done once per instance.
    pub async fn start(&self) -> SyncResult<()> {
        let mut lifecycle = self.lifecycle.lock().await;
        if !matches!(*lifecycle, Lifecycle::Idle) {
            return Err(SyncError::AlreadyStarted);
        }

        info!(document = %self.document, "Connecting to document store");
        let pump = match self.store.subscribe(&self.document).await {
            Ok(mut subscription) => {
                let resolver = self.resolver.clone();
                Some(tokio::spawn(async move {
                    while let Some(event) = subscription.next().await {
                        // Failures are already logged and adopted by the resolver
                        let _ = resolver.apply(event);
                    }
                    debug!("Content subscription ended");
                }))
            }
            Err(e) => {
                let _ = self.resolver.apply(ChannelEvent::Error(ChannelError::from(&e)));
                None
            }
        };

        *lifecycle = Lifecycle::Running(pump);
        Ok(())
    }

    /// Tear the subscription down. Later calls do nothing.
    pub async fn shutdown(&self) {
        let mut lifecycle = self.lifecycle.lock().await;
        if let Lifecycle::Running(Some(pump)) = std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            pump.abort();
            info!(document = %self.document, "Disconnected from document store");
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn current(&self) -> ResolvedContent {
        self.resolver.state()
    }

    pub fn watch(&self) -> watch::Receiver<ResolvedContent> {
        self.resolver.watch()
    }

    /// Wait for the first resolution
    pub async fn ready(&self) -> SyncResult<Resolution> {
        let mut rx = self.resolver.watch();
        let state = rx
            .wait_for(|state| !state.is_loading())
            .await
            .map_err(|_| SyncError::Loading)?;
        state.resolution().cloned().ok_or(SyncError::Loading)
    }

    pub fn language(&self) -> Language {
        *self.language.borrow()
    }

    /// Changes which tree is read; never what is stored
    pub fn set_language(&self, language: Language) {
        self.language.send_replace(language);
    }

    /// Tree for the active language; `None` while loading
    pub fn active_tree(&self) -> Option<ContentTree> {
        self.current()
            .resolution()
            .map(|resolution| resolution.content.get(self.language()).clone())
    }

    /// Open a draft of one language. Requires a session and loaded content.
    pub fn open_editor(&self, language: Language) -> SyncResult<Draft> {
        self.sessions.require()?;
        let state = self.current();
        let resolution = state.resolution().ok_or(SyncError::Loading)?;
        Ok(Draft::open(&resolution.content, language))
    }

    /// Save the draft as a full-document overwrite.
    ///
    /// The new map is adopted locally before the write is issued. A failed
    /// write is reported but not rolled back; the next snapshot from the
    /// store is what corrects local state.
    pub async fn save(&self, draft: &Draft) -> SyncResult<()> {
        let session = self.sessions.require()?;
        // Nothing may be adopted ahead of the first channel event
        if self.resolver.state().is_loading() {
            return Err(SyncError::Loading);
        }

        let next = self.resolver.apply_optimistic(|base| draft.commit(base));
        info!(
            email = %session.email,
            language = %draft.language(),
            version = draft.version(),
            "Saving content"
        );

        self.gateway.overwrite(&next).await
    }

    pub async fn force_reset(&self, confirm: &dyn Confirm) -> SyncResult<ResetOutcome> {
        self.gateway.force_reset(&self.sessions, confirm).await
    }
}

impl Drop for ContentSync {
    fn drop(&mut self) {
        if let Lifecycle::Running(Some(pump)) =
            std::mem::replace(self.lifecycle.get_mut(), Lifecycle::Stopped)
        {
            pump.abort();
        }
    }
}
