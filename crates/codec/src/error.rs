//! Codec error type.
//!
//! Every variant is a binary contract violation: the input bytes do not
//! match the layout the lock script (or the ASN.1 grammar) requires.

/// Errors from codec operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The bytes are not a DER `SEQUENCE` of two 32-byte `INTEGER` scalars.
    #[error("malformed DER signature: {0}")]
    MalformedSignature(&'static str),

    /// Fewer bytes than the fixed 37-byte authenticator-data prefix.
    #[error("authenticator data truncated: got {0} bytes, need 37")]
    TruncatedData(usize),

    /// The natural witness content is wider than the fixed hex width.
    #[error("witness content is {0} hex chars, exceeds the 1128-char limit")]
    OversizedWitness(usize),

    /// The public key is not a usable SEC1 P-256 point encoding.
    #[error("malformed public key: {0}")]
    MalformedPublicKey(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            CodecError::TruncatedData(12).to_string(),
            "authenticator data truncated: got 12 bytes, need 37"
        );
        assert_eq!(
            CodecError::MalformedSignature("unexpected tag").to_string(),
            "malformed DER signature: unexpected tag"
        );
        assert_eq!(
            CodecError::OversizedWitness(1130).to_string(),
            "witness content is 1130 hex chars, exceeds the 1128-char limit"
        );
    }

    #[test]
    fn errors_are_copy() {
        let a = CodecError::TruncatedData(5);
        let b = a;
        assert_eq!(a, b);
    }
}
