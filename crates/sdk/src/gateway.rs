//! Challenge gateway trait and the HTTP bridge.
//!
//! # Architecture
//!
//! [`ChallengeGateway`] is a trait so tests can observe and replace the
//! gateway; [`HttpGateway`] is the production implementation, bridging to
//! the transport-level [`gateway_client::GatewayClient`] and mapping its
//! errors into [`WalletError`] at this seam.

pub use gateway_client::{ChallengeGrant, CredentialPayload, UserHandle, VerifiedAuthenticator};

use gateway_client::{GatewayClient, GatewayError};

use crate::WalletError;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Issues ceremony challenges and verifies ceremony results.
///
/// One round trip per call, no retries. The grant's bearer token must be
/// threaded into the matching [`submit_ceremony_result`](ChallengeGateway::submit_ceremony_result).
pub trait ChallengeGateway: Send + Sync {
    /// Requests a registration challenge.
    fn begin_registration(
        &self,
        username: &str,
        display_name: &str,
    ) -> impl std::future::Future<Output = Result<ChallengeGrant, WalletError>> + Send;

    /// Requests a login challenge.
    fn begin_login(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<ChallengeGrant, WalletError>> + Send;

    /// Submits a ceremony result for verification.
    fn submit_ceremony_result(
        &self,
        token: &str,
        payload: &CredentialPayload,
    ) -> impl std::future::Future<Output = Result<VerifiedAuthenticator, WalletError>> + Send;
}

// ---------------------------------------------------------------------------
// Error bridge
// ---------------------------------------------------------------------------

impl From<GatewayError> for WalletError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Network(detail) => WalletError::Network(detail),
            GatewayError::Rejected(message) => WalletError::Server(message),
            GatewayError::Http { status, body } => {
                WalletError::Server(format!("HTTP {status}: {body}"))
            }
            GatewayError::InvalidResponse(detail) => WalletError::Server(detail.to_owned()),
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Gateway capability backed by the REST client.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: GatewayClient,
}

impl HttpGateway {
    /// Wraps an existing [`GatewayClient`].
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// Creates a gateway for the environment's configured URL.
    pub fn from_config(config: &config::WalletConfig) -> Self {
        Self::new(GatewayClient::from_config(config))
    }
}

impl ChallengeGateway for HttpGateway {
    async fn begin_registration(
        &self,
        username: &str,
        display_name: &str,
    ) -> Result<ChallengeGrant, WalletError> {
        Ok(self
            .client
            .begin_registration(username, display_name)
            .await?)
    }

    async fn begin_login(&self, username: &str) -> Result<ChallengeGrant, WalletError> {
        Ok(self.client.begin_login(username).await?)
    }

    async fn submit_ceremony_result(
        &self,
        token: &str,
        payload: &CredentialPayload,
    ) -> Result<VerifiedAuthenticator, WalletError> {
        Ok(self.client.submit_ceremony_result(token, payload).await?)
    }
}

// ---------------------------------------------------------------------------
// No-op implementation (for sign-only or read-only wallets)
// ---------------------------------------------------------------------------

/// A gateway capability that always fails.
///
/// Use this for wallets that never register or log in: `sign` needs no
/// gateway round trip, so a signing-only embedder can run entirely offline.
pub struct NoGateway;

impl ChallengeGateway for NoGateway {
    async fn begin_registration(
        &self,
        _username: &str,
        _display_name: &str,
    ) -> Result<ChallengeGrant, WalletError> {
        Err(WalletError::Network("no gateway configured".to_owned()))
    }

    async fn begin_login(&self, _username: &str) -> Result<ChallengeGrant, WalletError> {
        Err(WalletError::Network("no gateway configured".to_owned()))
    }

    async fn submit_ceremony_result(
        &self,
        _token: &str,
        _payload: &CredentialPayload,
    ) -> Result<VerifiedAuthenticator, WalletError> {
        Err(WalletError::Network("no gateway configured".to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_map_into_wallet_errors() {
        assert_eq!(
            WalletError::from(GatewayError::Network("refused".to_owned())),
            WalletError::Network("refused".to_owned())
        );
        assert_eq!(
            WalletError::from(GatewayError::Rejected("user exists".to_owned())),
            WalletError::Server("user exists".to_owned())
        );
        assert_eq!(
            WalletError::from(GatewayError::InvalidResponse("missing token")),
            WalletError::Server("missing token".to_owned())
        );

        let http = GatewayError::Http {
            status: gateway_client::StatusCode::BAD_GATEWAY,
            body: "oops".to_owned(),
        };
        assert_eq!(
            WalletError::from(http),
            WalletError::Server("HTTP 502 Bad Gateway: oops".to_owned())
        );
    }

    #[tokio::test]
    async fn no_gateway_always_fails() {
        assert!(matches!(
            NoGateway.begin_login("a@b.com").await,
            Err(WalletError::Network(_))
        ));
    }
}
