//! Login: the assertion ceremony, with an idempotent fast path.
//!
//! A login call against an email that already holds a live session returns
//! the reconstructed [`Account`] with zero gateway round trips and no
//! ceremony. Everything else runs the full flow: `begin_login` grant,
//! ceremony `get` scoped to the grant's allowed credentials, verification,
//! session write. A successful login overwrites whatever session was stored
//! before, including one belonging to a different email.

use tracing::{debug, info};

use crate::account::{Account, AccountState, validate_email};
use crate::ceremony::{AssertionOptions, CredentialCeremony};
use crate::gateway::{ChallengeGateway, ChallengeGrant, CredentialPayload};
use crate::session::SessionStore;
use crate::{Wallet, WalletError};

impl<G, C, S> Wallet<G, C, S>
where
    G: ChallengeGateway,
    C: CredentialCeremony,
    S: SessionStore,
{
    /// Authenticates `email` with an existing credential.
    ///
    /// Idempotent: if a non-expired session for this email is already
    /// stored, it is returned as-is. Otherwise the full assertion flow
    /// runs and replaces the stored session.
    ///
    /// # Errors
    ///
    /// [`WalletError::Validation`] on a malformed email (before any I/O),
    /// [`WalletError::CeremonyInFlight`] when another ceremony is already
    /// running for this email, plus the gateway, ceremony, and store
    /// failures of the individual steps.
    pub async fn login(&self, email: &str) -> Result<Account, WalletError> {
        self.check_cancelled()?;
        validate_email(email)?;
        let _guard = self.begin_operation(email)?;

        match self.active_session() {
            Ok(Some(session)) if session.email == email => {
                let account = session.to_account();
                self.publish(AccountState::Authenticated(account.clone()));
                debug!(email = %account.email, "wallet_login_cached");
                return Ok(account);
            }
            // No session, a session for another email, or an expired one
            // (already deleted by the read): run the full ceremony.
            Ok(_) | Err(WalletError::SessionExpired) => {}
            Err(err) => return Err(err),
        }

        self.publish(AccountState::Authenticating);
        match self.login_inner(email).await {
            Ok(account) => {
                self.publish(AccountState::Authenticated(account.clone()));
                info!(email = %account.email, "wallet_login");
                Ok(account)
            }
            Err(err) => {
                self.publish(self.state_from_store());
                Err(err)
            }
        }
    }

    async fn login_inner(&self, email: &str) -> Result<Account, WalletError> {
        let ChallengeGrant {
            token,
            challenge,
            allow_credentials,
            ..
        } = self.inner.gateway.begin_login(email).await?;

        let assertion = self
            .run_ceremony(self.inner.ceremony.get(AssertionOptions {
                challenge,
                rp: self.inner.config.rp,
                allow_credentials,
            }))
            .await?;

        let payload = CredentialPayload::assertion(
            &assertion.credential_id,
            &assertion.client_data_json,
            &assertion.authenticator_data,
            &assertion.signature,
            assertion.user_handle.as_deref(),
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
