//! Integration tests for the gateway REST flow.
//!
//! These tests hit a live verification gateway and exercise the
//! `/register` / `/login` / `/response` contract. They are marked
//! `#[ignore]` because they require a gateway to be running.
//!
//! Run with:
//!
//! ```bash
//! cargo test -p gateway-client --test gateway_http -- --ignored --nocapture
//! ```

use config::WalletConfig;
use gateway_client::{CredentialPayload, GatewayClient, GatewayError};

fn make_client() -> GatewayClient {
    GatewayClient::from_config(&WalletConfig::LOCAL)
}

/// Unique-enough username so repeated runs do not collide server-side.
fn fresh_username() -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis();
    format!("it-{now}@passlock.test")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// `/register` issues a token and a decodable binary challenge.
#[tokio::test]
#[ignore = "requires a verification gateway on localhost:3000"]
async fn begin_registration_issues_grant() {
    let client = make_client();
    let username = fresh_username();

    let grant = client
        .begin_registration(&username, &username)
        .await
        .expect("begin_registration should succeed");

    assert!(!grant.token.is_empty(), "token should be non-empty");
    assert!(
        grant.challenge.len() >= 16,
        "challenge should be at least 16 bytes, got {}",
        grant.challenge.len()
    );

    let user = grant.user.expect("registration grant should carry a user");
    assert_eq!(user.name, username);
}

/// `/login` for an unknown user is a gateway-level rejection, not transport.
#[tokio::test]
#[ignore = "requires a verification gateway on localhost:3000"]
async fn begin_login_unknown_user_is_rejected() {
    let client = make_client();

    let result = client.begin_login(&fresh_username()).await;

    match result {
        Err(GatewayError::Rejected(message)) => {
            assert!(!message.is_empty(), "rejection should carry a message")
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

/// `/response` with a fabricated payload must not verify.
#[tokio::test]
#[ignore = "requires a verification gateway on localhost:3000"]
async fn submit_garbage_result_is_rejected() {
    let client = make_client();
    let username = fresh_username();

    let grant = client
        .begin_registration(&username, &username)
        .await
        .expect("begin_registration should succeed");

    let fake = CredentialPayload::attestation(&[0xAB; 16], b"{}", &[0xCD; 64]);
    let result = client.submit_ceremony_result(&grant.token, &fake).await;

    assert!(
        matches!(
            result,
            Err(GatewayError::Rejected(_)) | Err(GatewayError::Http { .. })
        ),
        "fabricated attestation should not verify, got {result:?}"
    );
}
