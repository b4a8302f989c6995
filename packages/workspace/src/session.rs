//! # Session Management
//!
//! Tracks the signed-in identity. The identity provider itself is external;
//! this module only holds what it hands back. Presence of a session is the
//! one authorization signal, and it is checked when a guarded operation runs,
//! not when the process starts.

use crate::error::SyncError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

/// Opaque signed-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    /// Display string for the signed-in user
    pub email: String,
}

#[derive(Debug, Clone)]
pub enum Credential {
    Token(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Identity provider error: {0}")]
    Provider(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credential: &Credential) -> Result<Session, AuthError>;

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;
}

/// Accepts a fixed set of admin tokens, each mapped to a display email
#[derive(Debug, Clone, Default)]
pub struct TokenIdentityProvider {
    admins: HashMap<String, String>,
}

impl TokenIdentityProvider {
    pub fn new<I, T, E>(admins: I) -> Self
    where
        I: IntoIterator<Item = (T, E)>,
        T: Into<String>,
        E: Into<String>,
    {
        Self {
            admins: admins
                .into_iter()
                .map(|(token, email)| (token.into(), email.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    async fn sign_in(&self, credential: &Credential) -> Result<Session, AuthError> {
        let Credential::Token(token) = credential;
        let email = self
            .admins
            .get(token)
            .ok_or(AuthError::InvalidCredential)?;

        Ok(Session {
            uid: format!("token:{}", email),
            email: email.clone(),
        })
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), AuthError> {
        Ok(())
    }
}

pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    current: watch::Sender<Option<Session>>,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            current: watch::channel(None).0,
        }
    }

    pub async fn sign_in(&self, credential: &Credential) -> Result<Session, AuthError> {
        let session = self.provider.sign_in(credential).await?;
        info!(email = %session.email, "Signed in");
        self.current.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Ends the local session immediately; provider failures are only logged
    pub async fn sign_out(&self) {
        let Some(session) = self.current.send_replace(None) else {
            return;
        };
        if let Err(e) = self.provider.sign_out(&session).await {
            warn!(email = %session.email, "Sign-out request failed: {}", e);
        }
        info!(email = %session.email, "Signed out");
    }

    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn has_session(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// The active session, or `Unauthorized`
    pub fn require(&self) -> Result<Session, SyncError> {
        self.current().ok_or(SyncError::Unauthorized)
    }

    pub fn watch(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }
}
