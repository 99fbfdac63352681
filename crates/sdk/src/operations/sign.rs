//! Message signing: an assertion ceremony turned into a lock witness.
//!
//! # Flow
//!
//! 1. Require a live session with a non-empty credential id and public key.
//! 2. Ceremony `get` with the caller's message as the challenge and the
//!    stored credential as the sole allowed credential. No gateway round
//!    trip: the chain verifies the signature, not the gateway.
//! 3. Codec: extract `(r, s)` from the DER signature, parse the
//!    authenticator data, assemble the fixed-width witness hex.
//!
//! The lock script recomputes the signed payload as
//! `authenticator_data ‖ SHA256(client_data_json)` and checks the embedded
//! challenge equals the transaction message, so the witness carries every
//! byte the script needs and nothing else.

use bytes::Bytes;
use passlock_codec::{build_lock_witness, extract_signature_components, parse_authenticator_data};
use tracing::info;

use crate::ceremony::{AssertionOptions, CredentialCeremony};
use crate::gateway::ChallengeGateway;
use crate::session::SessionStore;
use crate::{Wallet, WalletError, utils};

impl<G, C, S> Wallet<G, C, S>
where
    G: ChallengeGateway,
    C: CredentialCeremony,
    S: SessionStore,
{
    /// Signs `message` with the authenticated account's credential and
    /// returns the lock-witness hex string (always 1128 characters).
    ///
    /// Never touches the gateway and never mutates the stored session.
    ///
    /// # Errors
    ///
    /// [`WalletError::NotAuthenticated`] without a live, sign-capable
    /// session (an expired session is deleted first and reported the same
    /// way), [`WalletError::CeremonyInFlight`] when another ceremony is
    /// already running for this account, plus ceremony and codec failures.
    pub async fn sign(&self, message: &[u8]) -> Result<String, WalletError> {
        self.check_cancelled()?;

        let session = match self.active_session() {
            Ok(Some(session)) => session,
            Ok(None) | Err(WalletError::SessionExpired) => {
                return Err(WalletError::NotAuthenticated);
            }
            Err(err) => return Err(err),
        };
        if session.credential_id.is_empty() || session.public_key.is_empty() {
            return Err(WalletError::NotAuthenticated);
        }
        let _guard = self.begin_operation(&session.email)?;

        // The ceremony wants the credential id in its binary form; the
        // session stores the gateway's base64url string.
        let credential_id = utils::base64url_decode(&session.credential_id)
            .ok_or(WalletError::NotAuthenticated)?;

        let assertion = self
            .run_ceremony(self.inner.ceremony.get(AssertionOptions {
                challenge: Bytes::copy_from_slice(message),
                rp: self.inner.config.rp,
                allow_credentials: vec![Bytes::from(credential_id)],
            }))
            .await?;

        let components = extract_signature_components(&assertion.signature)?;
        let auth_data = parse_authenticator_data(&assertion.authenticator_data)?;
        let witness = build_lock_witness(
            &session.public_key,
            &components,
            &auth_data,
            &assertion.client_data_json,
        )?;

        info!(email = %session.email, "wallet_signed");
        Ok(witness)
    }
}
