//! Gateway transport error type.

use reqwest::StatusCode;

/// Errors from talking to the verification gateway.
///
/// The split matters to callers: [`Network`](GatewayError::Network) means the
/// request never completed, while the other variants mean the gateway
/// answered and declined or answered garbage.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request could not be sent or completed (DNS, TLS, timeout).
    #[error("gateway unreachable: {0}")]
    Network(String),

    /// The gateway answered with a non-success HTTP status.
    #[error("gateway HTTP error: status={status} body={body}")]
    Http {
        /// Status code of the response.
        status: StatusCode,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// The gateway processed the request and declined it (`status: "fail"`).
    #[error("gateway rejected the request: {0}")]
    Rejected(String),

    /// The gateway returned a 2xx body that does not match the contract.
    #[error("invalid gateway response: {0}")]
    InvalidResponse(&'static str),
}
