//! # Content Resolver
//!
//! Decides, for every channel event, which LocalizedContentMap the rest of the
//! system sees and where it came from. The map is replaced wholesale, never
//! edited in place, so a reader always holds a complete tree.
//!
//! | Event                      | Content                         | Source | Error banner |
//! |----------------------------|---------------------------------|--------|--------------|
//! | valid snapshot             | payload                         | cloud  | cleared      |
//! | snapshot missing a language| previous map (defaults if none) | local  | unchanged    |
//! | document does not exist    | defaults                        | local  | cleared      |
//! | channel error              | defaults                        | local  | set          |

use crate::channel::{ChannelError, ChannelErrorKind, ChannelEvent, Snapshot};
use crate::error::{SyncError, SyncResult};
use folio_content::{ContentSource, LocalDefaults, LocalizedContentMap};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

pub const PERMISSION_DENIED_MESSAGE: &str =
    "Permission Denied: Unable to read Cloud Data. Please check the document store access rules.";

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedContent {
    /// No channel event has arrived yet; nothing may be rendered
    Loading,
    Ready(Resolution),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub content: Arc<LocalizedContentMap>,
    pub source: ContentSource,
    /// User-visible banner for channel failures
    pub error: Option<String>,
}

impl ResolvedContent {
    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            ResolvedContent::Loading => None,
            ResolvedContent::Ready(resolution) => Some(resolution),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResolvedContent::Loading)
    }
}

/// Banner text for a channel failure
pub fn channel_error_message(error: &ChannelError) -> String {
    match error.kind {
        ChannelErrorKind::PermissionDenied => PERMISSION_DENIED_MESSAGE.to_string(),
        _ => format!("Connection Error: {}", error.message),
    }
}

pub struct ContentResolver {
    defaults: Arc<LocalizedContentMap>,
    state: watch::Sender<ResolvedContent>,
}

impl ContentResolver {
    pub fn new(defaults: &LocalDefaults) -> Self {
        Self {
            defaults: defaults.content(),
            state: watch::channel(ResolvedContent::Loading).0,
        }
    }

    pub fn state(&self) -> ResolvedContent {
        self.state.borrow().clone()
    }

    /// Notified on every state change
    pub fn watch(&self) -> watch::Receiver<ResolvedContent> {
        self.state.subscribe()
    }

    /// Resolve one channel event.
    ///
    /// The new state is always adopted before returning; an `Err` only
    /// classifies what went wrong, for the caller to report.
    pub fn apply(&self, event: ChannelEvent) -> SyncResult<()> {
        match event {
            ChannelEvent::Snapshot(Snapshot {
                payload: Some(payload),
            }) => match LocalizedContentMap::from_payload(&payload) {
                Ok(map) => {
                    info!("Cloud content loaded");
                    self.state.send_replace(ResolvedContent::Ready(Resolution {
                        content: Arc::new(map),
                        source: ContentSource::Cloud,
                        error: None,
                    }));
                    Ok(())
                }
                Err(e) => {
                    warn!("Cloud content exists but is invalid, using local content: {}", e);
                    let defaults = self.defaults.clone();
                    self.state.send_modify(|state| {
                        let (content, error) = match state {
                            ResolvedContent::Ready(previous) => {
                                (previous.content.clone(), previous.error.clone())
                            }
                            ResolvedContent::Loading => (defaults, None),
                        };
                        *state = ResolvedContent::Ready(Resolution {
                            content,
                            source: ContentSource::Local,
                            error,
                        });
                    });
                    Err(SyncError::InvalidCloudPayload(e))
                }
            },

            ChannelEvent::Snapshot(Snapshot { payload: None }) => {
                // Absence is not repaired here; only a force reset seeds the document
                info!("Content document does not exist yet, using local defaults");
                self.adopt_defaults(None);
                Ok(())
            }

            ChannelEvent::Error(e) => {
                error!(kind = ?e.kind, "Content channel error: {}", e.message);
                let message = channel_error_message(&e);
                self.adopt_defaults(Some(message.clone()));
                match e.kind {
                    ChannelErrorKind::PermissionDenied => {
                        Err(SyncError::ChannelPermissionDenied(message))
                    }
                    _ => Err(SyncError::Channel(message)),
                }
            }
        }
    }

    /// Replace the active map ahead of the store confirming it.
    ///
    /// `update` receives the current map (defaults while loading). Source and
    /// error banner are left as they are.
    pub fn apply_optimistic<F>(&self, update: F) -> Arc<LocalizedContentMap>
    where
        F: FnOnce(&LocalizedContentMap) -> LocalizedContentMap,
    {
        let defaults = self.defaults.clone();
        let mut adopted = defaults.clone();

        self.state.send_modify(|state| {
            let next = match state {
                ResolvedContent::Ready(previous) => Resolution {
                    content: Arc::new(update(&previous.content)),
                    source: previous.source,
                    error: previous.error.clone(),
                },
                ResolvedContent::Loading => Resolution {
                    content: Arc::new(update(&defaults)),
                    source: ContentSource::Local,
                    error: None,
                },
            };
            adopted = next.content.clone();
            *state = ResolvedContent::Ready(next);
        });

        adopted
    }

    fn adopt_defaults(&self, error: Option<String>) {
        self.state.send_replace(ResolvedContent::Ready(Resolution {
            content: self.defaults.clone(),
            source: ContentSource::Local,
            error,
        }));
    }
}
