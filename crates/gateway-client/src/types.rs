//! Wire types for the gateway REST contract and their normalized forms.
//!
//! The gateway speaks JSON with camelCase field names and base64url-encoded
//! binary values. Everything leaving this module is normalized: binary
//! fields decoded to [`Bytes`], `status: "fail"` bodies turned into
//! [`GatewayError::Rejected`], missing mandatory fields into
//! [`GatewayError::InvalidResponse`].

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// `status` value the gateway uses for accepted requests.
pub(crate) const STATUS_OK: &str = "ok";

// ---------------------------------------------------------------------------
// Base64url helpers
// ---------------------------------------------------------------------------

pub(crate) fn base64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes base64url with or without `=` padding.
pub(crate) fn base64url_decode(input: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(input.trim_end_matches('=')).ok()
}

// ---------------------------------------------------------------------------
// Normalized types (public surface)
// ---------------------------------------------------------------------------

/// One-time permission to run a credential ceremony.
///
/// Issued by `/register` and `/login`. The `token` authorizes exactly one
/// subsequent `/response` call; the binary fields are already decoded from
/// their base64url wire form.
#[derive(Debug, Clone)]
pub struct ChallengeGrant {
    /// Bearer token for the follow-up verification call.
    pub token: String,
    /// Server-issued challenge bytes the ceremony must sign over.
    pub challenge: Bytes,
    /// User handle to register under. Present on registration grants only.
    pub user: Option<UserHandle>,
    /// Credential ids the gateway will accept. Present on login grants.
    pub allow_credentials: Vec<Bytes>,
}

/// Identity the authenticator binds a new credential to.
#[derive(Debug, Clone)]
pub struct UserHandle {
    /// Opaque user id bytes.
    pub id: Bytes,
    /// Account name (the email).
    pub name: String,
    /// Display name shown by the authenticator UI.
    pub display_name: String,
}

/// Gateway-verified authenticator identity, returned by `/response`.
#[derive(Debug, Clone)]
pub struct VerifiedAuthenticator {
    /// Credential id, kept in its base64url wire form (accounts store it
    /// as an opaque string).
    pub credential_id: String,
    /// Decoded public key bytes (SEC1 uncompressed point, 65 bytes).
    pub public_key: Bytes,
    /// Attestation format the gateway verified against.
    pub format: String,
    /// Signature counter at verification time.
    pub counter: u32,
}

// ---------------------------------------------------------------------------
// Ceremony result payload (request body for `/response`)
// ---------------------------------------------------------------------------

/// JSON-serialized credential ceremony result.
///
/// This is the shape the gateway verifies: binary fields base64url-encoded,
/// attestation and assertion distinguished by which `response` fields are
/// present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialPayload {
    /// Credential id (base64url).
    pub id: String,
    /// Same bytes as `id`; the ceremony API exposes both.
    #[serde(rename = "rawId")]
    pub raw_id: String,
    /// Always `"public-key"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Authenticator outputs.
    pub response: CeremonyResponse,
}

/// Authenticator outputs carried inside a [`CredentialPayload`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CeremonyResponse {
    /// Serialized client data (base64url).
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    /// Attestation object (base64url). Registration ceremonies only.
    #[serde(
        rename = "attestationObject",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attestation_object: Option<String>,
    /// Raw authenticator data (base64url). Assertion ceremonies only.
    #[serde(
        rename = "authenticatorData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub authenticator_data: Option<String>,
    /// DER-encoded signature (base64url). Assertion ceremonies only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// User handle echoed by the authenticator, if any (base64url).
    #[serde(rename = "userHandle", default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
}

impl CredentialPayload {
    /// Builds the payload for a registration (attestation) result.
    pub fn attestation(
        credential_id: &[u8],
        client_data_json: &[u8],
        attestation_object: &[u8],
    ) -> Self {
        let id = base64url_encode(credential_id);
        Self {
            raw_id: id.clone(),
            id,
            kind: "public-key".to_owned(),
            response: CeremonyResponse {
                client_data_json: base64url_encode(client_data_json),
                attestation_object: Some(base64url_encode(attestation_object)),
                authenticator_data: None,
                signature: None,
                user_handle: None,
            },
        }
    }

    /// Builds the payload for a login/signing (assertion) result.
    pub fn assertion(
        credential_id: &[u8],
        client_data_json: &[u8],
        authenticator_data: &[u8],
        signature: &[u8],
        user_handle: Option<&[u8]>,
    ) -> Self {
        let id = base64url_encode(credential_id);
        Self {
            raw_id: id.clone(),
            id,
            kind: "public-key".to_owned(),
            response: CeremonyResponse {
                client_data_json: base64url_encode(client_data_json),
                attestation_object: None,
                authenticator_data: Some(base64url_encode(authenticator_data)),
                signature: Some(base64url_encode(signature)),
                user_handle: user_handle.map(base64url_encode),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Wire bodies (deserialization only)
// ---------------------------------------------------------------------------

/// Response body of `/register` and `/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct BeginBody {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub user: Option<WireUser>,
    #[serde(default, rename = "allowCredentials")]
    pub allow_credentials: Option<Vec<WireCredentialDescriptor>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub id: String,
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCredentialDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    #[allow(dead_code)]
    pub kind: String,
}

/// Response body of `/response`.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitBody {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub authenticator: Option<WireAuthenticator>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireAuthenticator {
    #[serde(rename = "credID")]
    pub cred_id: String,
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub fmt: String,
    pub counter: u32,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn rejection(message: Option<String>) -> GatewayError {
    GatewayError::Rejected(message.unwrap_or_else(|| "gateway declined the request".to_owned()))
}

impl BeginBody {
    /// Normalizes a begin-* body into a [`ChallengeGrant`].
    pub(crate) fn into_grant(self) -> Result<ChallengeGrant, GatewayError> {
        if self.status != STATUS_OK {
            return Err(rejection(self.message));
        }

        let token = self
            .token
            .ok_or(GatewayError::InvalidResponse("missing token"))?;
        let challenge = self
            .challenge
            .as_deref()
            .and_then(base64url_decode)
            .ok_or(GatewayError::InvalidResponse("missing or undecodable challenge"))?;

        let user = match self.user {
            Some(user) => Some(UserHandle {
                id: Bytes::from(base64url_decode(&user.id).ok_or(
                    GatewayError::InvalidResponse("undecodable user handle"),
                )?),
                name: user.name,
                display_name: user.display_name,
            }),
            None => None,
        };

        let allow_credentials = self
            .allow_credentials
            .unwrap_or_default()
            .into_iter()
            .map(|descriptor| {
                base64url_decode(&descriptor.id)
                    .map(Bytes::from)
                    .ok_or(GatewayError::InvalidResponse("undecodable credential id"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChallengeGrant {
            token,
            challenge: Bytes::from(challenge),
            user,
            allow_credentials,
        })
    }
}

impl SubmitBody {
    /// Normalizes a `/response` body into a [`VerifiedAuthenticator`].
    pub(crate) fn into_authenticator(self) -> Result<VerifiedAuthenticator, GatewayError> {
        if self.status != STATUS_OK {
            return Err(rejection(self.message));
        }

        let wire = self
            .authenticator
            .ok_or(GatewayError::InvalidResponse("missing authenticator"))?;
        let public_key = base64url_decode(&wire.public_key)
            .ok_or(GatewayError::InvalidResponse("undecodable public key"))?;

        Ok(VerifiedAuthenticator {
            credential_id: wire.cred_id,
            public_key: Bytes::from(public_key),
            format: wire.fmt,
            counter: wire.counter,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
