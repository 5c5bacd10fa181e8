//! Session state holder
//!
//! The single source of truth for whether the user is signed in.
//! Navigation reads it through a `watch` subscription.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use super::token_store::TokenStore;
use crate::{Error, Result};

/// Storage key holding the auth token
pub const TOKEN_KEY: &str = "token";

#[derive(Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { token: String },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token } => Some(token),
            Self::Anonymous => None,
        }
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Authenticated { .. } => f.write_str("Authenticated { token: <redacted> }"),
        }
    }
}

pub struct Session {
    store: Arc<dyn TokenStore>,
    tx: watch::Sender<SessionState>,
}

impl Session {
    /// Load the persisted token, if any
    pub async fn restore(store: Arc<dyn TokenStore>) -> Result<Self> {
        let state = match store.get(TOKEN_KEY).await? {
            Some(token) if !token.is_empty() => SessionState::Authenticated { token },
            _ => SessionState::Anonymous,
        };
        let (tx, _) = watch::channel(state);
        Ok(Self { store, tx })
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Persist the token, then publish `Authenticated`
    pub async fn login(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::required("token"));
        }
        self.store.set(TOKEN_KEY, &token).await?;
        self.tx.send_replace(SessionState::Authenticated { token });
        info!("Session started");
        Ok(())
    }

    /// Forget the token, then publish `Anonymous`
    pub async fn logout(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.tx.send_replace(SessionState::Anonymous);
        info!("Session ended");
        Ok(())
    }
}
