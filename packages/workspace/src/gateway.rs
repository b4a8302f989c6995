//! # Persistence Gateway
//!
//! The only two writes this system makes. Both replace the entire remote
//! document, so entries deleted in the editor are deleted remotely too.
//! Neither is retried.

use crate::channel::{DocumentId, DocumentStore};
use crate::error::{SyncError, SyncResult};
use crate::session::SessionManager;
use folio_content::{LocalDefaults, LocalizedContentMap};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const RESET_WARNING: &str = "WARNING: This will overwrite the cloud document with the \
built-in default content. Any cloud edits will be lost. Are you sure?";

/// Human confirmation for irreversible actions
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms without asking
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Reset,
    Cancelled,
}

pub struct PersistenceGateway {
    store: Arc<dyn DocumentStore>,
    document: DocumentId,
    defaults: LocalDefaults,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn DocumentStore>, document: DocumentId, defaults: LocalDefaults) -> Self {
        Self {
            store,
            document,
            defaults,
        }
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    /// Write `map` as the entire document
    pub async fn overwrite(&self, map: &LocalizedContentMap) -> SyncResult<()> {
        let payload = map.to_payload()?;
        self.store
            .set(&self.document, payload)
            .await
            .map_err(|e| {
                error!(document = %self.document, "Save failed: {}", e);
                SyncError::Write(e.to_string())
            })?;

        info!(document = %self.document, "Content saved");
        Ok(())
    }

    /// Replace the remote document with the built-in defaults, verbatim.
    ///
    /// Requires a session and an explicit confirmation.
    pub async fn force_reset(
        &self,
        sessions: &SessionManager,
        confirm: &dyn Confirm,
    ) -> SyncResult<ResetOutcome> {
        let session = sessions.require()?;

        if !confirm.confirm(RESET_WARNING) {
            info!(email = %session.email, "Force reset cancelled");
            return Ok(ResetOutcome::Cancelled);
        }

        warn!(email = %session.email, document = %self.document, "Resetting document to local defaults");
        self.store
            .set(&self.document, self.defaults.payload().clone())
            .await
            .map_err(|e| {
                error!(document = %self.document, "Reset failed: {}", e);
                SyncError::Write(e.to_string())
            })?;

        Ok(ResetOutcome::Reset)
    }
}
