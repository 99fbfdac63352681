//! Binary codecs for passkey-backed lock witnesses.
//!
//! A smart-contract lock script verifies an ECDSA signature over constrained
//! message bytes. The authenticator returns its artifacts in wire formats the
//! script cannot consume directly, so this crate provides the pure byte
//! transforms between the two worlds:
//!
//! - [`extract_signature_components`] -- DER `SEQUENCE { INTEGER r, INTEGER s }`
//!   to fixed 32-byte scalars
//! - [`parse_authenticator_data`] -- the 37-byte authenticator-data prefix
//! - [`build_lock_witness`] -- the final fixed-width hex witness blob
//!
//! Everything here is synchronous, deterministic, and free of I/O. Any
//! deviation from the expected byte layout fails loudly with a
//! [`CodecError`]; the chain gives no second opinion.

pub mod authenticator;
pub mod der;
pub mod error;
pub mod hex;
pub mod witness;

pub use authenticator::{
    AUTH_DATA_LEN, AuthenticatorData, FLAG_USER_PRESENT, FLAG_USER_VERIFIED,
    parse_authenticator_data,
};
pub use der::{SignatureComponents, extract_signature_components};
pub use error::CodecError;
pub use hex::{hex_decode, hex_encode};
pub use witness::{LOCK_WITNESS_HEX_LEN, build_lock_witness};
