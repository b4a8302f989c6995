//! Content sync for the Folio portfolio.
//!
//! Subscribes to one remote content document, resolves what is shown against
//! built-in defaults, and writes edits back as full-document overwrites.

pub mod channel;
pub mod error;
pub mod gateway;
pub mod resolver;
pub mod server;
pub mod session;
pub mod stores;
pub mod sync;

pub use channel::{
    ChannelError, ChannelErrorKind, ChannelEvent, DocumentId, DocumentStore, Snapshot, StoreError,
    Subscription,
};
pub use error::{SyncError, SyncResult};
pub use gateway::{AssumeYes, Confirm, PersistenceGateway, ResetOutcome, RESET_WARNING};
pub use resolver::{
    channel_error_message, ContentResolver, Resolution, ResolvedContent,
    PERMISSION_DENIED_MESSAGE,
};
pub use session::{AuthError, Credential, IdentityProvider, Session, SessionManager, TokenIdentityProvider};
pub use stores::{FileStore, MemoryStore};
pub use sync::{ContentSync, SyncConfig};
