//! Account registration: the attestation ceremony.
//!
//! # Flow
//!
//! 1. Validate the email locally.
//! 2. `begin_registration` grant: bearer token, challenge, user handle.
//! 3. Ceremony `create` over the challenge, bounded by the configured
//!    timeout.
//! 4. Submit the attestation for verification; the gateway returns the
//!    credential id and public key it extracted.
//! 5. Persist the session atomically, publish `Authenticated`.
//!
//! Nothing is written before step 5: a failure at any step leaves the
//! session store untouched and the published state reverts to whatever the
//! store implies.

use bytes::Bytes;
use tracing::info;

use crate::account::{Account, AccountState, validate_email};
use crate::ceremony::{AttestationOptions, CredentialCeremony};
use crate::gateway::{ChallengeGateway, ChallengeGrant, CredentialPayload};
use crate::session::SessionStore;
use crate::{Wallet, WalletError};

impl<G, C, S> Wallet<G, C, S>
where
    G: ChallengeGateway,
    C: CredentialCeremony,
    S: SessionStore,
{
    /// Registers a new account under `email` and authenticates it.
    ///
    /// The email doubles as the account's username and display name. On
    /// success the new session is persisted and published; the returned
    /// [`Account`] carries the gateway-verified credential id and public
    /// key.
    ///
    /// # Errors
    ///
    /// [`WalletError::Validation`] on a malformed email (before any I/O),
    /// [`WalletError::CeremonyInFlight`] when another ceremony is already
    /// running for this email, plus the gateway, ceremony, and store
    /// failures of the individual steps.
    pub async fn register(&self, email: &str) -> Result<Account, WalletError> {
        self.check_cancelled()?;
        validate_email(email)?;
        let _guard = self.begin_operation(email)?;

        self.publish(AccountState::Authenticating);
        match self.register_inner(email).await {
            Ok(account) => {
                self.publish(AccountState::Authenticated(account.clone()));
                info!(email = %account.email, "wallet_registered");
                Ok(account)
            }
            Err(err) => {
                self.publish(self.state_from_store());
                Err(err)
            }
        }
    }

    async fn register_inner(&self, email: &str) -> Result<Account, WalletError> {
        let ChallengeGrant {
            token,
            challenge,
            user,
            ..
        } = self.inner.gateway.begin_registration(email, email).await?;

        // Grants without a user handle fall back to keying the credential
        // by the email bytes.
        let (user_id, user_name, user_display_name) = match user {
            Some(user) => (user.id, user.name, user.display_name),
            None => (
                Bytes::copy_from_slice(email.as_bytes()),
                email.to_owned(),
                email.to_owned(),
            ),
        };

        let attestation = self
            .run_ceremony(self.inner.ceremony.create(AttestationOptions {
                challenge,
                rp: self.inner.config.rp,
                user_id,
                user_name,
                user_display_name,
            }))
            .await?;

        let payload = CredentialPayload::attestation(
            &attestation.credential_id,
            &attestation.client_data_json,
            &attestation.attestation_object,
        );
        let verified = self
            .inner
            .gateway
            .submit_ceremony_result(&token, &payload)
            .await?;

        let account = Account {
            email: email.to_owned(),
            credential_id: verified.credential_id,
            public_key: passlock_codec::hex_encode(&verified.public_key),
        };
        self.persist_session(&account)?;
        Ok(account)
    }
}
