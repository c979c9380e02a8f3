//! Transport payload decoding
//!
//! The radio-stack transport delivers binary payloads as base64 text and
//! device identifiers as hex text. Decoding is pure and stateless; whether a
//! zero-length result means "absent" is a per-field rule that belongs to the
//! callers, not to this module.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};

// ----------------------------------------------------------------------------
// Base64 Payloads
// ----------------------------------------------------------------------------

/// Decode a base64-encoded transport payload into raw bytes.
///
/// Zero-length output is a successful decode, distinct from a failure:
/// callers use it to apply field-specific absence rules. Invalid alphabet or
/// padding fails with [`Error::Decoding`] scoped to `context`.
pub fn decode_base64(encoded: &str, context: &'static str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| Error::decoding(context, e))
}

// ----------------------------------------------------------------------------
// Identity Bytes
// ----------------------------------------------------------------------------

/// Decode the hex form of a device identifier into its raw bytes.
///
/// The result is informational only, so this never fails: dashes are
/// ignored and an identifier that is not valid hex yields an empty vector.
pub fn decode_identity(identifier: &str) -> Vec<u8> {
    let cleaned: String = identifier.chars().filter(|c| *c != '-').collect();
    hex::decode(cleaned).unwrap_or_default()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
