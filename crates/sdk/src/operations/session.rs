//! Session reads and logout. No ceremonies, no gateway round trips.

use tracing::info;

use crate::account::{Account, AccountState};
use crate::ceremony::CredentialCeremony;
use crate::gateway::ChallengeGateway;
use crate::session::SessionStore;
use crate::{Wallet, WalletError};

impl<G, C, S> Wallet<G, C, S>
where
    G: ChallengeGateway,
    C: CredentialCeremony,
    S: SessionStore,
{
    /// Returns the authenticated account, if any.
    ///
    /// With `Some(email)` the stored session must belong to that exact
    /// email; with `None` any live session matches. Reading an expired
    /// session deletes it and publishes `Anonymous`; expiry is reported as
    /// `Ok(None)`, never as an error.
    pub async fn is_authenticated(
        &self,
        email: Option<&str>,
    ) -> Result<Option<Account>, WalletError> {
        self.check_cancelled()?;

        let session = match self.active_session() {
            Ok(Some(session)) => session,
            Ok(None) => {
                self.publish(AccountState::Anonymous);
                return Ok(None);
            }
            // The expired session was deleted and Anonymous published by
            // the read itself.
            Err(WalletError::SessionExpired) => return Ok(None),
            Err(err) => return Err(err),
        };

        if let Some(expected) = email {
            if session.email != expected {
                return Ok(None);
            }
        }

        let account = session.to_account();
        self.publish(AccountState::Authenticated(account.clone()));
        Ok(Some(account))
    }

    /// Ends the current session.
    ///
    /// Unconditional and idempotent: logging out without a session
    /// succeeds, calling it twice succeeds, and it still runs after
    /// `shutdown` so embedders can always clear local state. The published
    /// state is `Anonymous` either way.
    pub async fn logout(&self) -> Result<(), WalletError> {
        self.inner.sessions.clear()?;
        self.publish(AccountState::Anonymous);
        info!("wallet_logout");
        Ok(())
    }
}
