//! Challenge gateway client: HTTPS transport for credential verification.
//!
//! This crate provides [`GatewayClient`], a standalone REST client for the
//! Passlock verification gateway. The gateway issues ceremony challenges and
//! verifies ceremony results:
//!
//! - [`begin_registration`](GatewayClient::begin_registration) -- `POST /register`
//! - [`begin_login`](GatewayClient::begin_login) -- `POST /login`
//! - [`submit_ceremony_result`](GatewayClient::submit_ceremony_result) -- `POST /response`
//!
//! # Architecture
//!
//! This crate is **transport only** -- it knows how to speak the gateway's
//! REST contract but has no knowledge of the SDK's trait system. The SDK
//! bridges the gap by implementing its `ChallengeGateway` trait on top of
//! this client.
//!
//! Each operation is a single round trip; nothing is retried here. The
//! bearer token issued by a begin-* call must be threaded into the matching
//! [`submit_ceremony_result`](GatewayClient::submit_ceremony_result) call.

mod error;
mod types;

pub use error::GatewayError;
pub use reqwest::StatusCode;
pub use types::{
    CeremonyResponse, ChallengeGrant, CredentialPayload, UserHandle, VerifiedAuthenticator,
};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use crate::types::{BeginBody, SubmitBody};

// ---------------------------------------------------------------------------
// Gateway client
// ---------------------------------------------------------------------------

/// REST client for the challenge/verification gateway.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Creates a client for the given base URL.
    ///
    /// A trailing slash on `base_url` is tolerated and stripped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Creates a client from a [`WalletConfig`](config::WalletConfig).
    pub fn from_config(config: &config::WalletConfig) -> Self {
        Self::new(config.gateway_url)
    }

    /// Returns the configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests a registration challenge for `username`.
    pub async fn begin_registration(
        &self,
        username: &str,
        display_name: &str,
    ) -> Result<ChallengeGrant, GatewayError> {
        let body = self
            .post_json(
                "/register",
                None,
                &json!({ "username": username, "name": display_name }),
            )
            .await?;

        let grant = parse_body::<BeginBody>(&body, "begin-registration")?.into_grant()?;
        debug!(
            username,
            challenge_len = grant.challenge.len(),
            "gateway_registration_grant"
        );
        Ok(grant)
    }

    /// Requests a login challenge for `username`.
    pub async fn begin_login(&self, username: &str) -> Result<ChallengeGrant, GatewayError> {
        let body = self
            .post_json("/login", None, &json!({ "username": username }))
            .await?;

        let grant = parse_body::<BeginBody>(&body, "begin-login")?.into_grant()?;
        debug!(
            username,
            allowed = grant.allow_credentials.len(),
            "gateway_login_grant"
        );
        Ok(grant)
    }

    /// Submits a ceremony result for verification.
    ///
    /// `token` is the bearer credential from the begin-* call that issued
    /// the challenge this result answers.
    pub async fn submit_ceremony_result(
        &self,
        token: &str,
        payload: &CredentialPayload,
    ) -> Result<VerifiedAuthenticator, GatewayError> {
        let body = self.post_json("/response", Some(token), payload).await?;

        let verified = parse_body::<SubmitBody>(&body, "submit-result")?.into_authenticator()?;
        debug!(
            credential_id = %verified.credential_id,
            format = %verified.format,
            counter = verified.counter,
            "gateway_result_verified"
        );
        Ok(verified)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Sends a JSON POST and returns the raw 2xx response body.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<String, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "gateway_request_start");

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| {
            error!(url = %url, error = %e, "gateway_http_send_error");
            GatewayError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            error!(url = %url, status = %status, body = %body, "gateway_http_error_response");
            return Err(GatewayError::Http { status, body });
        }
        Ok(body)
    }
}

/// Decodes a gateway body, logging the offending payload on failure.
fn parse_body<T: serde::de::DeserializeOwned>(
    body: &str,
    operation: &'static str,
) -> Result<T, GatewayError> {
    serde_json::from_str(body).map_err(|e| {
        error!(operation, error = %e, body = %body, "gateway_json_parse_error");
        GatewayError::InvalidResponse("undecodable response body")
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
