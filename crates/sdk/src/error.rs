//! SDK error types.
//!
//! [`WalletError`] is the unified error type for all wallet operations.
//! Every failure surfaces to the caller; nothing is retried internally.

use passlock_codec::CodecError;

// ---------------------------------------------------------------------------
// WalletError
// ---------------------------------------------------------------------------

/// Errors from wallet operations.
///
/// `SessionExpired` never escapes the public operations: read sites convert
/// it into a "not authenticated" outcome after deleting the stale record.
/// It exists as a variant so store readers can signal expiry distinctly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    /// The email failed validation. Raised before any I/O.
    #[error("invalid email: {0}")]
    Validation(&'static str),

    /// The gateway could not be reached (DNS, TLS, timeout).
    #[error("network failure: {0}")]
    Network(String),

    /// The gateway answered and declined, or answered out of contract.
    /// Carries the server's message for display.
    #[error("server error: {0}")]
    Server(String),

    /// The authenticator ceremony failed: user cancellation, platform
    /// rejection, or no authenticator available.
    #[error("ceremony failed: {0}")]
    Ceremony(String),

    /// Signing or session reads require a completed registration/login.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The stored session has passed its expiry. Internal; converted to
    /// `NotAuthenticated` semantics at every read site.
    #[error("session expired")]
    SessionExpired,

    /// The ceremony outlived the challenge-validity window.
    #[error("challenge expired before the ceremony completed")]
    ChallengeExpired,

    /// Another register/login/sign ceremony is already running for this
    /// account. Overlapping calls are rejected, not queued.
    #[error("a ceremony is already in flight for this account")]
    CeremonyInFlight,

    /// The wallet has been shut down (cancellation token fired).
    #[error("operation cancelled")]
    Cancelled,

    /// The session store failed to read or write.
    #[error("session store failure: {0}")]
    Store(String),

    /// A binary contract violation from the signature codec.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
