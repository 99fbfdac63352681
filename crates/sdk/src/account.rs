//! Account identity and published wallet state.

use crate::WalletError;

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// A wallet identity backed by a registered credential.
///
/// `credential_id` and `public_key` come from the gateway's verification of
/// a completed ceremony; both must be non-empty before the account can sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Email the account is keyed by.
    pub email: String,
    /// Opaque authenticator credential id (base64url string).
    pub credential_id: String,
    /// Hex-encoded public key (65-byte uncompressed SEC1 point, 130 chars,
    /// no `0x` prefix).
    pub public_key: String,
}

impl Account {
    /// True when the account carries everything `sign` needs.
    pub fn can_sign(&self) -> bool {
        !self.credential_id.is_empty() && !self.public_key.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AccountState
// ---------------------------------------------------------------------------

/// Wallet state as published on the subscription channel.
///
/// `Authenticating` is transient: it appears while a register/login ceremony
/// runs and resolves to `Authenticated` or back to whatever the session
/// store implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountState {
    /// No valid session.
    Anonymous,
    /// A register/login ceremony is in progress.
    Authenticating,
    /// A valid session exists for this account.
    Authenticated(Account),
}

impl AccountState {
    /// Returns the account when authenticated.
    pub fn account(&self) -> Option<&Account> {
        match self {
            Self::Authenticated(account) => Some(account),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Email validation
// ---------------------------------------------------------------------------

/// Validates an email address before any I/O happens.
///
/// Deliberately pragmatic rather than full RFC 5322: one `@`, a non-empty
/// local part, and a dotted domain whose labels are alphanumeric (hyphens
/// allowed inside). Anything a verification gateway would bounce anyway is
/// rejected here first.
pub(crate) fn validate_email(email: &str) -> Result<(), WalletError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(WalletError::Validation("missing @"));
    };
    if local.is_empty() || local.len() > 64 {
        return Err(WalletError::Validation("bad local part"));
    }
    if local.contains(char::is_whitespace) || local.contains('@') {
        return Err(WalletError::Validation("bad local part"));
    }
    if !domain.contains('.') {
        return Err(WalletError::Validation("domain must be dotted"));
    }
    for label in domain.split('.') {
        let ok = !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !ok {
            return Err(WalletError::Validation("bad domain"));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
