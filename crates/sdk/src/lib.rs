//! Passlock SDK: passkey-backed wallet identity and lock-witness signing.
//!
//! The SDK orchestrates wallet operations by combining:
//! - **Gateway** ([`gateway::ChallengeGateway`]) for challenge issuance and
//!   ceremony verification
//! - **Ceremony** ([`ceremony::CredentialCeremony`]) for the authenticator
//!   interaction itself
//! - **Sessions** ([`session::SessionStore`]) for the single persisted
//!   session record
//! - **Codec** (`passlock-codec`) for turning assertion bytes into the
//!   on-chain witness
//!
//! # Architecture
//!
//! One state machine: `Anonymous -> Authenticating -> Authenticated`,
//! published through a `tokio::sync::watch` channel. Register and login run
//! a credential ceremony against the gateway and persist a session; `sign`
//! runs a ceremony against the stored credential and emits a lock witness
//! without any gateway round trip. All three are serialized per email: an
//! overlapping call is rejected with [`WalletError::CeremonyInFlight`],
//! never queued.
//!
//! # Usage
//!
//! ```no_run
//! use config::{Environment, WalletConfig};
//! use sdk::Wallet;
//! use sdk::ceremony::NoCeremony;
//! use sdk::gateway::HttpGateway;
//! use sdk::session::InMemorySessionStore;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), sdk::WalletError> {
//! let config = WalletConfig::for_environment(Environment::Testnet);
//! let cancel = CancellationToken::new();
//!
//! let wallet = Wallet::new(
//!     config,
//!     HttpGateway::from_config(&config),
//!     NoCeremony,
//!     InMemorySessionStore::new(),
//!     cancel.clone(),
//! )?;
//!
//! // The wallet is Clone -- share across tasks.
//! let wallet2 = wallet.clone();
//!
//! // Observe state transitions.
//! let mut states = wallet.subscribe();
//!
//! // Graceful shutdown.
//! cancel.cancel();
//! wallet.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod ceremony;
pub mod embed;
pub mod error;
pub mod gateway;
mod operations;
pub mod session;
pub(crate) mod utils;

pub use account::{Account, AccountState};
pub use error::WalletError;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use config::WalletConfig;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::ceremony::CredentialCeremony;
use crate::gateway::ChallengeGateway;
use crate::session::{Session, SessionStore};

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// Shared state across all wallet operations.
pub(crate) struct WalletInner<G, C, S> {
    pub config: WalletConfig,
    pub gateway: G,
    pub ceremony: C,
    pub sessions: S,
    pub state_tx: watch::Sender<AccountState>,
    pub in_flight: Mutex<HashSet<String>>,
    pub cancel: CancellationToken,
}

/// The wallet entry point.
///
/// `Clone`-able (wraps an `Arc<WalletInner>`). All capabilities are
/// trait-based so embedders inject their platform's authenticator and
/// storage.
///
/// # Type Parameters
///
/// - `G`: Challenge gateway (use [`gateway::NoGateway`] for sign-only
///   wallets that never register or log in)
/// - `C`: Credential ceremony (use [`ceremony::NoCeremony`] when no
///   authenticator is available)
/// - `S`: Session persistence (defaults to
///   [`session::InMemorySessionStore`])
pub struct Wallet<G, C, S = session::InMemorySessionStore> {
    pub(crate) inner: Arc<WalletInner<G, C, S>>,
}

// Manual Clone: we don't require G, C, S to be Clone.
impl<G, C, S> Clone for Wallet<G, C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G, C, S> std::fmt::Debug for Wallet<G, C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("environment", &self.inner.config.environment)
            .finish()
    }
}

impl<G, C, S> Wallet<G, C, S>
where
    G: ChallengeGateway,
    C: CredentialCeremony,
    S: SessionStore,
{
    /// Creates a new wallet.
    ///
    /// Reads the session store once to seed the published state: a live
    /// session starts the wallet `Authenticated`, an expired one is deleted
    /// and the wallet starts `Anonymous`. No network I/O happens during
    /// construction.
    ///
    /// # Errors
    ///
    /// Propagates session-store failures from the initial read.
    pub fn new(
        config: WalletConfig,
        gateway: G,
        ceremony: C,
        sessions: S,
        cancel: CancellationToken,
    ) -> Result<Self, WalletError> {
        let initial = match sessions.load()? {
            Some(session) if session.is_expired(utils::now_epoch_ms()) => {
                sessions.clear()?;
                AccountState::Anonymous
            }
            Some(session) => AccountState::Authenticated(session.to_account()),
            None => AccountState::Anonymous,
        };
        let (state_tx, _) = watch::channel(initial);

        Ok(Self {
            inner: Arc::new(WalletInner {
                config,
                gateway,
                ceremony,
                sessions,
                state_tx,
                in_flight: Mutex::new(HashSet::new()),
                cancel,
            }),
        })
    }

    /// Returns a reference to the wallet configuration.
    pub fn config(&self) -> &WalletConfig {
        &self.inner.config
    }

    /// Subscribes to account-state transitions.
    ///
    /// The receiver immediately holds the current state; duplicate
    /// publishes are suppressed, so every change observed is a real
    /// transition.
    pub fn subscribe(&self) -> watch::Receiver<AccountState> {
        self.inner.state_tx.subscribe()
    }

    /// The currently published account state.
    pub fn state(&self) -> AccountState {
        self.inner.state_tx.borrow().clone()
    }

    /// Returns a reference to the cancellation token.
    pub fn cancel(&self) -> &CancellationToken {
        &self.inner.cancel
    }

    /// Graceful shutdown: signals cancellation and waits for in-flight
    /// operations to drain.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        // Allow a brief period for operations checking the token to exit.
        tokio::task::yield_now().await;
    }

    /// Checks whether the wallet has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    /// Returns [`WalletError::Cancelled`] if the cancellation token has
    /// fired.
    pub(crate) fn check_cancelled(&self) -> Result<(), WalletError> {
        if self.inner.cancel.is_cancelled() {
            Err(WalletError::Cancelled)
        } else {
            Ok(())
        }
    }

    // -----------------------------------------------------------------------
    // State publication
    // -----------------------------------------------------------------------

    /// Publishes `state` to subscribers, suppressing no-op transitions.
    pub(crate) fn publish(&self, state: AccountState) {
        self.inner.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    /// The state the session store implies right now. Pure read: expired
    /// sessions are reported `Anonymous` but not deleted, and store errors
    /// degrade to `Anonymous` rather than failing the caller.
    pub(crate) fn state_from_store(&self) -> AccountState {
        match self.inner.sessions.load() {
            Ok(Some(session)) if !session.is_expired(utils::now_epoch_ms()) => {
                AccountState::Authenticated(session.to_account())
            }
            _ => AccountState::Anonymous,
        }
    }

    // -----------------------------------------------------------------------
    // Session access
    // -----------------------------------------------------------------------

    /// Loads the stored session, enforcing expiry.
    ///
    /// An expired session is deleted, `Anonymous` is published, and
    /// [`WalletError::SessionExpired`] is returned; callers translate that
    /// into their own "not authenticated" shape. `Ok(None)` means no
    /// session was stored at all.
    pub(crate) fn active_session(&self) -> Result<Option<Session>, WalletError> {
        let Some(session) = self.inner.sessions.load()? else {
            return Ok(None);
        };
        if session.is_expired(utils::now_epoch_ms()) {
            self.inner.sessions.clear()?;
            self.publish(AccountState::Anonymous);
            return Err(WalletError::SessionExpired);
        }
        Ok(Some(session))
    }

    /// Writes the session for a freshly authenticated account, stamping
    /// the configured TTL (a TTL of 0 stores the never-expires sentinel).
    pub(crate) fn persist_session(&self, account: &Account) -> Result<(), WalletError> {
        let ttl = self.inner.config.session_ttl_ms;
        let expires_at_epoch_ms = if ttl == 0 {
            0
        } else {
            utils::now_epoch_ms().saturating_add(ttl)
        };
        self.inner.sessions.store(Session {
            email: account.email.clone(),
            credential_id: account.credential_id.clone(),
            public_key: account.public_key.clone(),
            expires_at_epoch_ms,
        })
    }

    // -----------------------------------------------------------------------
    // Ceremony serialization and bounding
    // -----------------------------------------------------------------------

    /// Marks a ceremony in flight for `email`.
    ///
    /// Rejects with [`WalletError::CeremonyInFlight`] when one is already
    /// running for the same email. The returned guard releases the slot on
    /// drop, including on panic and early `?` returns.
    pub(crate) fn begin_operation(&self, email: &str) -> Result<InFlightGuard<'_>, WalletError> {
        let mut in_flight = self.inner.in_flight.lock().unwrap();
        if !in_flight.insert(email.to_owned()) {
            return Err(WalletError::CeremonyInFlight);
        }
        Ok(InFlightGuard {
            emails: &self.inner.in_flight,
            email: email.to_owned(),
        })
    }

    /// Runs a ceremony future under the configured timeout.
    ///
    /// The bound matches the gateway's challenge-validity window, so a
    /// ceremony that outlives it fails locally with
    /// [`WalletError::ChallengeExpired`] instead of being rejected
    /// server-side. A configured window of 0 disables the bound.
    pub(crate) async fn run_ceremony<T>(
        &self,
        ceremony: impl std::future::Future<Output = Result<T, WalletError>>,
    ) -> Result<T, WalletError> {
        match self.inner.config.ceremony_timeout_secs() {
            Some(secs) => {
                tokio::time::timeout(std::time::Duration::from_secs(secs), ceremony)
                    .await
                    .map_err(|_| WalletError::ChallengeExpired)?
            }
            None => ceremony.await,
        }
    }
}

/// RAII entry in the per-email in-flight set.
pub(crate) struct InFlightGuard<'a> {
    emails: &'a Mutex<HashSet<String>>,
    email: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.emails.lock().unwrap().remove(&self.email);
    }
}
