//! # Session store: the bearer token, in memory and persisted
//!
//! [`SessionStore`] owns the one piece of state the client keeps across page
//! loads: the opaque bearer token issued at login. Every mutation writes the
//! persistent copy through a [`KeyValueStore`] and the in-memory copy together,
//! so the two never disagree.
//!
//! Implementations of [`KeyValueStore`] live in sibling modules
//! ([`crate::memory`], [`crate::local`]).

use thiserror::Error;

/// Failure talking to the underlying key-value storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Backend(String),
}

/// Synchronous string key-value storage (e.g. `localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Holds at most one bearer token, mirrored to persistent storage.
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    key: String,
    token: Option<String>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            token: None,
        }
    }

    /// Load the persisted token into memory. Called once at startup.
    ///
    /// Unreadable storage is treated as "no token".
    pub fn hydrate(&mut self) -> Option<&str> {
        if self.token.is_none() {
            self.token = match self.storage.get(&self.key) {
                Ok(token) => token.filter(|t| !t.is_empty()),
                Err(e) => {
                    tracing::warn!("Could not read persisted session: {e}");
                    None
                }
            };
        }
        self.token.as_deref()
    }

    /// The current token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Persist and hold a new token.
    ///
    /// The in-memory copy only changes once the persistent write succeeded.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<(), StoreError> {
        let token = token.into();
        self.storage.set(&self.key, &token)?;
        self.token = Some(token);
        Ok(())
    }

    /// Drop both copies, returning the token that was held.
    ///
    /// The in-memory copy is always cleared; a storage failure is reported
    /// after the fact.
    pub fn clear(&mut self) -> Result<Option<String>, StoreError> {
        let previous = self.token.take();
        self.storage.remove(&self.key)?;
        Ok(previous)
    }
}
