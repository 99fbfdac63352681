//! Lock witness assembly.
//!
//! The lock script verifies the ceremony signature over
//! `authenticator_data ‖ SHA256(client_data_json)` and expects the witness
//! as one fixed-width hex blob:
//!
//! | Segment                        | Bytes | Hex offset |
//! |--------------------------------|-------|------------|
//! | public key (SEC1 x ‖ y)        | 64    | 0          |
//! | r                              | 32    | 128        |
//! | s                              | 32    | 192        |
//! | authenticator-data prefix      | 37    | 256        |
//! | clientDataJSON                 | var   | 330        |
//!
//! The hex string is right-padded with ASCII `'0'` to exactly
//! [`LOCK_WITNESS_HEX_LEN`] characters. Padding only ever extends; content
//! that would not fit is rejected, never truncated.

use crate::CodecError;
use crate::authenticator::AuthenticatorData;
use crate::der::SignatureComponents;
use crate::hex::{hex_decode, hex_encode};

/// Total width of the hex-encoded lock witness (564 bytes).
pub const LOCK_WITNESS_HEX_LEN: usize = 1128;

/// SEC1 tag byte of an uncompressed point.
const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// Builds the hex lock witness from the signing ceremony's artifacts.
///
/// `public_key_hex` accepts the canonical 65-byte uncompressed SEC1 point
/// (130 hex chars, optional `0x` prefix); the tag byte is stripped so only
/// the 64 coordinate bytes enter the witness. A bare 64-byte form is also
/// accepted.
///
/// # Errors
///
/// Returns [`CodecError::MalformedPublicKey`] for unusable key encodings
/// and [`CodecError::OversizedWitness`] when the natural content exceeds
/// [`LOCK_WITNESS_HEX_LEN`] hex characters.
pub fn build_lock_witness(
    public_key_hex: &str,
    components: &SignatureComponents,
    auth_data: &AuthenticatorData,
    client_data_json: &[u8],
) -> Result<String, CodecError> {
    let key = normalize_public_key(public_key_hex)?;

    let mut witness = String::with_capacity(LOCK_WITNESS_HEX_LEN);
    witness.push_str(&hex_encode(&key));
    witness.push_str(&hex_encode(&components.r));
    witness.push_str(&hex_encode(&components.s));
    witness.push_str(&hex_encode(&auth_data.to_bytes()));
    witness.push_str(&hex_encode(client_data_json));

    if witness.len() > LOCK_WITNESS_HEX_LEN {
        return Err(CodecError::OversizedWitness(witness.len()));
    }
    while witness.len() < LOCK_WITNESS_HEX_LEN {
        witness.push('0');
    }
    Ok(witness)
}

/// Normalizes a hex public key to its 64 coordinate bytes.
fn normalize_public_key(public_key_hex: &str) -> Result<Vec<u8>, CodecError> {
    let hex = public_key_hex
        .strip_prefix("0x")
        .unwrap_or(public_key_hex);
    let bytes = hex_decode(hex).ok_or(CodecError::MalformedPublicKey("not valid hex"))?;

    match bytes.len() {
        65 if bytes[0] == SEC1_UNCOMPRESSED_TAG => Ok(bytes[1..].to_vec()),
        65 => Err(CodecError::MalformedPublicKey(
            "missing uncompressed point tag",
        )),
        64 => Ok(bytes),
        _ => Err(CodecError::MalformedPublicKey(
            "expected a 64- or 65-byte point",
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::parse_authenticator_data;
    use crate::hex::hex_encode;

    fn sample_components() -> SignatureComponents {
        SignatureComponents {
            r: [0xAA; 32],
            s: [0xBB; 32],
        }
    }

    fn sample_auth_data() -> AuthenticatorData {
        let mut raw = [0u8; 37];
        raw[..32].copy_from_slice(&[0xCC; 32]);
        raw[32] = 0x05;
        raw[33..].copy_from_slice(&42u32.to_be_bytes());
        parse_authenticator_data(&raw).unwrap()
    }

    fn sample_key_hex() -> String {
        let mut point = vec![0x04];
        point.extend_from_slice(&[0x11; 32]);
        point.extend_from_slice(&[0x22; 32]);
        hex_encode(&point)
    }

    #[test]
    fn witness_is_exactly_1128_chars() {
        let witness = build_lock_witness(
            &sample_key_hex(),
            &sample_components(),
            &sample_auth_data(),
            br#"{"type":"webauthn.get"}"#,
        )
        .unwrap();
        assert_eq!(witness.len(), LOCK_WITNESS_HEX_LEN);
    }

    #[test]
    fn segments_sit_at_fixed_offsets() {
        let client_data = br#"{"type":"webauthn.get","origin":"https://wallet.example"}"#;
        let witness = build_lock_witness(
            &sample_key_hex(),
            &sample_components(),
            &sample_auth_data(),
            client_data,
        )
        .unwrap();

        let mut coords = Vec::new();
        coords.extend_from_slice(&[0x11; 32]);
        coords.extend_from_slice(&[0x22; 32]);

        assert_eq!(&witness[..128], hex_encode(&coords));
        assert_eq!(&witness[128..192], hex_encode(&[0xAA; 32]));
        assert_eq!(&witness[192..256], hex_encode(&[0xBB; 32]));
        assert_eq!(&witness[256..330], hex_encode(&sample_auth_data().to_bytes()));
        assert_eq!(
            &witness[330..330 + client_data.len() * 2],
            hex_encode(client_data)
        );
    }

    #[test]
    fn padding_is_zero_suffix_only() {
        let client_data = b"{}";
        let witness = build_lock_witness(
            &sample_key_hex(),
            &sample_components(),
            &sample_auth_data(),
            client_data,
        )
        .unwrap();

        let natural_end = 330 + client_data.len() * 2;
        assert!(witness[natural_end..].bytes().all(|b| b == b'0'));
    }

    #[test]
    fn accepts_0x_prefix_and_bare_coordinates() {
        let prefixed = format!("0x{}", sample_key_hex());
        let witness_a = build_lock_witness(
            &prefixed,
            &sample_components(),
            &sample_auth_data(),
            b"{}",
        )
        .unwrap();

        let mut coords = Vec::new();
        coords.extend_from_slice(&[0x11; 32]);
        coords.extend_from_slice(&[0x22; 32]);
        let witness_b = build_lock_witness(
            &hex_encode(&coords),
            &sample_components(),
            &sample_auth_data(),
            b"{}",
        )
        .unwrap();

        assert_eq!(witness_a, witness_b);
    }

    #[test]
    fn content_filling_the_width_needs_no_padding() {
        // 330 fixed hex chars leave room for exactly 399 clientDataJSON bytes.
        let client_data = vec![0x7B; 399];
        let witness = build_lock_witness(
            &sample_key_hex(),
            &sample_components(),
            &sample_auth_data(),
            &client_data,
        )
        .unwrap();
        assert_eq!(witness.len(), LOCK_WITNESS_HEX_LEN);
        assert!(witness.ends_with("7b"));
    }

    #[test]
    fn oversized_content_rejected_not_truncated() {
        let client_data = vec![0x7B; 400];
        assert_eq!(
            build_lock_witness(
                &sample_key_hex(),
                &sample_components(),
                &sample_auth_data(),
                &client_data,
            ),
            Err(CodecError::OversizedWitness(1130))
        );
    }

    #[test]
    fn rejects_bad_public_keys() {
        let components = sample_components();
        let auth_data = sample_auth_data();

        assert_eq!(
            build_lock_witness("not hex!", &components, &auth_data, b"{}"),
            Err(CodecError::MalformedPublicKey("not valid hex"))
        );
        assert_eq!(
            build_lock_witness("04abc", &components, &auth_data, b"{}"),
            Err(CodecError::MalformedPublicKey("not valid hex"))
        );

        let wrong_tag = format!("05{}", &sample_key_hex()[2..]);
        assert_eq!(
            build_lock_witness(&wrong_tag, &components, &auth_data, b"{}"),
            Err(CodecError::MalformedPublicKey(
                "missing uncompressed point tag"
            ))
        );

        assert_eq!(
            build_lock_witness("0402", &components, &auth_data, b"{}"),
            Err(CodecError::MalformedPublicKey(
                "expected a 64- or 65-byte point"
            ))
        );
    }
}
