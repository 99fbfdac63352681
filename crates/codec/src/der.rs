//! DER ECDSA signature decomposition.
//!
//! Authenticators return ECDSA signatures as an ASN.1 DER
//! `SEQUENCE { INTEGER r, INTEGER s }`. The lock script wants the two raw
//! 32-byte big-endian scalars, so the integers are extracted, the
//! sign-padding byte stripped, and short values left-padded with zeros.
//!
//! Length parsing handles both the short form (a single byte below 0x80)
//! and the long form (an 0x81..0x84 prefix followed by that many length
//! bytes). Real authenticators occasionally emit long-form encodings; a
//! fixed-offset parser silently mis-decodes those instead of failing.

use crate::CodecError;

/// ASN.1 tag of a DER `SEQUENCE`.
const TAG_SEQUENCE: u8 = 0x30;
/// ASN.1 tag of a DER `INTEGER`.
const TAG_INTEGER: u8 = 0x02;

/// Width of one extracted scalar.
const SCALAR_LEN: usize = 32;

// ---------------------------------------------------------------------------
// SignatureComponents
// ---------------------------------------------------------------------------

/// The `(r, s)` pair of an ECDSA signature, each exactly 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureComponents {
    /// The `r` scalar as a canonical unsigned big-endian value.
    pub r: [u8; 32],
    /// The `s` scalar as a canonical unsigned big-endian value.
    pub s: [u8; 32],
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extracts the `(r, s)` scalars from a DER-encoded ECDSA signature.
///
/// Bytes after the outer `SEQUENCE` are ignored, mirroring how trailing
/// extensions are ignored in authenticator data.
///
/// # Errors
///
/// Returns [`CodecError::MalformedSignature`] when the input is not a
/// `SEQUENCE` of exactly two `INTEGER`s, a length encoding is invalid or
/// out of bounds, or either scalar exceeds 32 bytes after removing the
/// sign-padding byte.
pub fn extract_signature_components(der: &[u8]) -> Result<SignatureComponents, CodecError> {
    let (seq_len, content) = read_header(der, 0, der.len(), TAG_SEQUENCE)?;
    let seq_end = content
        .checked_add(seq_len)
        .filter(|end| *end <= der.len())
        .ok_or(CodecError::MalformedSignature(
            "sequence length out of bounds",
        ))?;

    let (r, after_r) = read_integer(der, content, seq_end)?;
    let (s, after_s) = read_integer(der, after_r, seq_end)?;

    if after_s != seq_end {
        return Err(CodecError::MalformedSignature(
            "trailing bytes inside sequence",
        ));
    }

    Ok(SignatureComponents { r, s })
}

/// Reads `tag` at `pos` followed by a short- or long-form DER length.
///
/// Returns the declared content length and the offset where the content
/// starts. `limit` is exclusive; nothing past it is touched.
fn read_header(
    buf: &[u8],
    pos: usize,
    limit: usize,
    tag: u8,
) -> Result<(usize, usize), CodecError> {
    if pos >= limit {
        return Err(CodecError::MalformedSignature("unexpected end of input"));
    }
    if buf[pos] != tag {
        return Err(CodecError::MalformedSignature("unexpected tag"));
    }

    let len_pos = pos + 1;
    if len_pos >= limit {
        return Err(CodecError::MalformedSignature("missing length byte"));
    }

    let first = buf[len_pos];
    if first < 0x80 {
        return Ok((first as usize, len_pos + 1));
    }

    // Long form: the low 7 bits give the number of length bytes. 0x80 would
    // be the indefinite form, which DER forbids; anything past 4 bytes
    // cannot describe an ECDSA signature.
    let num_len_bytes = (first & 0x7F) as usize;
    if num_len_bytes == 0 || num_len_bytes > 4 {
        return Err(CodecError::MalformedSignature(
            "unsupported length encoding",
        ));
    }

    let len_end = len_pos + 1 + num_len_bytes;
    if len_end > limit {
        return Err(CodecError::MalformedSignature("length bytes out of bounds"));
    }

    let mut len = 0usize;
    for &b in &buf[len_pos + 1..len_end] {
        len = (len << 8) | b as usize;
    }
    Ok((len, len_end))
}

/// Reads one `INTEGER` ending at or before `limit` and normalizes its value
/// to a 32-byte unsigned big-endian scalar.
fn read_integer(buf: &[u8], pos: usize, limit: usize) -> Result<([u8; 32], usize), CodecError> {
    let (len, start) = read_header(buf, pos, limit, TAG_INTEGER)?;
    let end = start
        .checked_add(len)
        .filter(|end| *end <= limit)
        .ok_or(CodecError::MalformedSignature(
            "integer length out of bounds",
        ))?;

    let mut value = &buf[start..end];

    // A 33rd leading 0x00 keeps a high-bit scalar positive in DER's signed
    // representation. Strip it; anything else over 32 bytes is invalid.
    if value.len() == SCALAR_LEN + 1 {
        if value[0] != 0 {
            return Err(CodecError::MalformedSignature("scalar exceeds 32 bytes"));
        }
        value = &value[1..];
    }
    if value.len() > SCALAR_LEN {
        return Err(CodecError::MalformedSignature("scalar exceeds 32 bytes"));
    }

    let mut scalar = [0u8; SCALAR_LEN];
    scalar[SCALAR_LEN - value.len()..].copy_from_slice(value);
    Ok((scalar, end))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
