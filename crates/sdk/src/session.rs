//! Session persistence: the single durable record behind the wallet.
//!
//! The wallet persists exactly one session at a time. [`SessionStore`] is a
//! trait so embedders can back it with whatever storage the platform offers
//! (browser local storage, a keychain, a file); [`InMemorySessionStore`]
//! ships for development and tests.
//!
//! Store access is synchronous: implementations are expected to be fast and
//! non-suspending. Anything slower belongs behind a cache.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::WalletError;
use crate::account::Account;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Persisted projection of an [`Account`] plus its expiry.
///
/// `expires_at_epoch_ms == 0` is an explicit "never expires" sentinel,
/// produced by a session TTL of 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Email the session belongs to.
    pub email: String,
    /// Credential id (base64url string).
    pub credential_id: String,
    /// Hex-encoded public key.
    pub public_key: String,
    /// Expiry as milliseconds since the Unix epoch; 0 means never.
    pub expires_at_epoch_ms: u64,
}

impl Session {
    /// True once the session has passed its expiry.
    pub fn is_expired(&self, now_epoch_ms: u64) -> bool {
        self.expires_at_epoch_ms != 0 && self.expires_at_epoch_ms <= now_epoch_ms
    }

    /// Reconstructs the account this session was created for.
    pub fn to_account(&self) -> Account {
        Account {
            email: self.email.clone(),
            credential_id: self.credential_id.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Persists the wallet's single session record.
///
/// `store` must replace the whole record atomically: a concurrent `load`
/// sees either the old session or the new one, never a mix.
pub trait SessionStore: Send + Sync {
    /// Reads the current session, if any.
    fn load(&self) -> Result<Option<Session>, WalletError>;

    /// Replaces the current session.
    fn store(&self, session: Session) -> Result<(), WalletError>;

    /// Deletes the current session. Deleting an absent session is not an
    /// error.
    fn clear(&self) -> Result<(), WalletError>;
}

// ---------------------------------------------------------------------------
// InMemorySessionStore
// ---------------------------------------------------------------------------

/// In-memory session store backed by `RwLock<Option<Session>>`.
///
/// Suitable for development and testing. Clones share the same record, so
/// tests can keep a handle while the wallet owns another.
#[derive(Clone)]
pub struct InMemorySessionStore {
    record: Arc<RwLock<Option<Session>>>,
}

impl InMemorySessionStore {
    /// Creates an empty in-memory session store.
    pub fn new() -> Self {
        Self {
            record: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a store pre-seeded with a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(session))),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>, WalletError> {
        Ok(self.record.read().unwrap().clone())
    }

    fn store(&self, session: Session) -> Result<(), WalletError> {
        *self.record.write().unwrap() = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), WalletError> {
        *self.record.write().unwrap() = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
