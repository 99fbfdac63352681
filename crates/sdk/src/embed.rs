//! Embedding protocol types.
//!
//! A wallet running as an embedded UI surface (an iframe, a webview)
//! exchanges JSON messages with its host page. This module defines the
//! envelope only; the transport (postMessage, a channel, a socket) belongs
//! to the embedder.
//!
//! Flow: the surface emits [`READY`](EmbedAction::Ready) once on load; the
//! host then issues `LOGIN` and `SIGN` requests; either side sends `CLOSE`
//! to dismiss the surface.
//!
//! `requestId` is a correlation extension beyond the original host contract:
//! requests may carry one and responses echo it via [`EmbedMessage::reply`],
//! so concurrent `LOGIN`/`SIGN` requests can be disambiguated. Envelopes
//! without one remain valid.

use serde::{Deserialize, Serialize};

use crate::utils::generate_uuid_v4;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Message kinds exchanged with the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbedAction {
    /// Surface finished loading. Emitted once, no payload.
    #[serde(rename = "READY")]
    Ready,
    /// Host requests authentication; response carries the account identity.
    #[serde(rename = "LOGIN")]
    Login,
    /// Host requests a signature; request payload is the hex message,
    /// response payload is the lock-witness hex string.
    #[serde(rename = "SIGN")]
    Sign,
    /// Dismiss the embedded surface.
    #[serde(rename = "CLOSE")]
    Close,
}

/// Payload of an [`EmbedMessage`].
///
/// Untagged on the wire: `LOGIN` responses carry the account object, `SIGN`
/// messages carry a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbedPayload {
    /// Authenticated account identity (`LOGIN` response).
    Account {
        /// Hex-encoded public key.
        #[serde(rename = "publicKey")]
        public_key: String,
        /// Account email.
        email: String,
    },
    /// Hex message to sign, or the resulting lock witness.
    Text(String),
}

/// JSON envelope exchanged with the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedMessage {
    /// Message kind.
    pub action: EmbedAction,
    /// Correlation id (UUIDv4). Optional extension; echoed in responses.
    #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Payload, when the action carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<EmbedPayload>,
}

impl EmbedMessage {
    /// The one-shot load notification.
    pub fn ready() -> Self {
        Self {
            action: EmbedAction::Ready,
            request_id: None,
            payload: None,
        }
    }

    /// Asks the host to dismiss the surface.
    pub fn close() -> Self {
        Self {
            action: EmbedAction::Close,
            request_id: None,
            payload: None,
        }
    }

    /// A `LOGIN` request with a fresh correlation id.
    pub fn login_request() -> Self {
        Self {
            action: EmbedAction::Login,
            request_id: Some(generate_uuid_v4(&mut rand_core::OsRng)),
            payload: None,
        }
    }

    /// A `SIGN` request for `message_hex`, with a fresh correlation id.
    pub fn sign_request(message_hex: impl Into<String>) -> Self {
        Self {
            action: EmbedAction::Sign,
            request_id: Some(generate_uuid_v4(&mut rand_core::OsRng)),
            payload: Some(EmbedPayload::Text(message_hex.into())),
        }
    }

    /// Builds the response to this message: same action, echoed
    /// correlation id, new payload.
    pub fn reply(&self, payload: EmbedPayload) -> Self {
        Self {
            action: self.action,
            request_id: self.request_id.clone(),
            payload: Some(payload),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
