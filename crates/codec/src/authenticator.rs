//! Authenticator data parsing.
//!
//! Authenticator data opens with a fixed 37-byte prefix:
//! `rpIdHash (32) ‖ flags (1) ‖ signCounter (4, big-endian)`. Whatever
//! follows (attested credential data, extensions) is not part of the lock
//! witness and is ignored here.

use crate::CodecError;

/// Byte length of the fixed authenticator-data prefix.
pub const AUTH_DATA_LEN: usize = 37;

/// User-presence flag bit (UP).
pub const FLAG_USER_PRESENT: u8 = 0x01;
/// User-verification flag bit (UV).
pub const FLAG_USER_VERIFIED: u8 = 0x04;

// ---------------------------------------------------------------------------
// AuthenticatorData
// ---------------------------------------------------------------------------

/// The fixed-layout prefix of authenticator data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatorData {
    /// SHA-256 hash of the relying-party id.
    pub rp_id_hash: [u8; 32],
    /// Authenticator flags byte.
    pub flags: u8,
    /// Signature counter, increases with each assertion.
    pub sign_counter: u32,
}

impl AuthenticatorData {
    /// Whether the user-presence bit is set.
    pub const fn user_present(&self) -> bool {
        self.flags & FLAG_USER_PRESENT != 0
    }

    /// Whether the user-verification bit is set.
    pub const fn user_verified(&self) -> bool {
        self.flags & FLAG_USER_VERIFIED != 0
    }

    /// Reassembles the 37-byte wire prefix.
    pub fn to_bytes(&self) -> [u8; AUTH_DATA_LEN] {
        let mut out = [0u8; AUTH_DATA_LEN];
        out[..32].copy_from_slice(&self.rp_id_hash);
        out[32] = self.flags;
        out[33..].copy_from_slice(&self.sign_counter.to_be_bytes());
        out
    }
}

/// Parses the fixed 37-byte prefix of authenticator data.
///
/// Trailing bytes beyond the prefix are accepted and ignored.
///
/// # Errors
///
/// Returns [`CodecError::TruncatedData`] if fewer than 37 bytes are supplied.
pub fn parse_authenticator_data(bytes: &[u8]) -> Result<AuthenticatorData, CodecError> {
    if bytes.len() < AUTH_DATA_LEN {
        return Err(CodecError::TruncatedData(bytes.len()));
    }

    let mut rp_id_hash = [0u8; 32];
    rp_id_hash.copy_from_slice(&bytes[..32]);

    Ok(AuthenticatorData {
        rp_id_hash,
        flags: bytes[32],
        sign_counter: u32::from_be_bytes([bytes[33], bytes[34], bytes[35], bytes[36]]),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
