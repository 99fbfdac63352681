//! Credential ceremony trait and types.
//!
//! A ceremony is the authenticator interaction itself: creating a credential
//! (attestation) or asserting over a challenge (assertion). The wallet treats
//! it as an opaque capability that either returns the authenticator's binary
//! outputs or fails -- key material never crosses this boundary.
//!
//! # Architecture
//!
//! [`CredentialCeremony`] is a trait so embedders can plug in whatever their
//! platform offers (a browser bridge, an OS passkey API, a hardware token)
//! and tests can substitute a deterministic signer. [`NoCeremony`] is the
//! always-failing implementation for wallets that never perform ceremonies.

use bytes::Bytes;
use config::RelyingParty;

use crate::WalletError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Inputs for a credential-creation (attestation) ceremony.
#[derive(Debug, Clone)]
pub struct AttestationOptions {
    /// Server-issued challenge bytes.
    pub challenge: Bytes,
    /// Relying party the credential is bound to.
    pub rp: RelyingParty,
    /// Opaque user handle the credential is registered under.
    pub user_id: Bytes,
    /// Account name (the email).
    pub user_name: String,
    /// Name shown by the authenticator UI.
    pub user_display_name: String,
}

/// Inputs for an assertion ceremony (login or signing).
#[derive(Debug, Clone)]
pub struct AssertionOptions {
    /// Challenge bytes the authenticator signs over. For wallet signing
    /// this is the caller's message.
    pub challenge: Bytes,
    /// Relying party the assertion is scoped to.
    pub rp: RelyingParty,
    /// Acceptable credential ids (binary). Empty means any credential
    /// bound to the relying party.
    pub allow_credentials: Vec<Bytes>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Authenticator outputs of a creation ceremony.
#[derive(Debug, Clone)]
pub struct AttestationResult {
    /// New credential id (binary).
    pub credential_id: Bytes,
    /// Serialized client data.
    pub client_data_json: Bytes,
    /// CBOR attestation object; opaque here, verified by the gateway.
    pub attestation_object: Bytes,
}

/// Authenticator outputs of an assertion ceremony.
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Credential id that produced the assertion (binary).
    pub credential_id: Bytes,
    /// Serialized client data.
    pub client_data_json: Bytes,
    /// Raw authenticator data (37-byte prefix plus extensions).
    pub authenticator_data: Bytes,
    /// DER-encoded ECDSA signature over
    /// `authenticator_data ‖ SHA256(client_data_json)`.
    pub signature: Bytes,
    /// User handle echoed by the authenticator, if any.
    pub user_handle: Option<Bytes>,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Performs credential ceremonies against a local authenticator.
///
/// Both calls may block on user presence or biometric input for an
/// unbounded, user-controlled duration; the wallet bounds them with its
/// configured ceremony timeout. A user cancellation or platform rejection
/// surfaces as [`WalletError::Ceremony`].
pub trait CredentialCeremony: Send + Sync {
    /// Creates a new credential (registration).
    fn create(
        &self,
        options: AttestationOptions,
    ) -> impl std::future::Future<Output = Result<AttestationResult, WalletError>> + Send;

    /// Asserts over a challenge with an existing credential (login, signing).
    fn get(
        &self,
        options: AssertionOptions,
    ) -> impl std::future::Future<Output = Result<AssertionResult, WalletError>> + Send;
}

// ---------------------------------------------------------------------------
// No-op implementation (for wallets without an authenticator)
// ---------------------------------------------------------------------------

/// A ceremony capability that always fails.
///
/// Use this when constructing a [`Wallet`](crate::Wallet) that only reads
/// session state (e.g. a status widget) and never registers, logs in, or
/// signs.
pub struct NoCeremony;

impl CredentialCeremony for NoCeremony {
    async fn create(&self, _options: AttestationOptions) -> Result<AttestationResult, WalletError> {
        Err(WalletError::Ceremony(
            "no authenticator capability configured".to_owned(),
        ))
    }

    async fn get(&self, _options: AssertionOptions) -> Result<AssertionResult, WalletError> {
        Err(WalletError::Ceremony(
            "no authenticator capability configured".to_owned(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
