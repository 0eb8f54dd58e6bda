//! Trusted public key material
//!
//! Firmware images ship the verification key as PEM, as bare standard
//! base64, or as raw bytes. X.509 `SubjectPublicKeyInfo` wrappers are
//! removed with the RustCrypto `spki` and `der` crates so the signature
//! backend receives the bare key (32-byte Ed25519 key, SEC1 point, or
//! PKCS#1 `RSAPublicKey`).

use crate::error::{Error, Result};
use crate::limits::MAX_PUBLIC_KEY_SIZE;
use crate::utils::codec::{self, Alphabet};
use der::Decode;
use spki::SubjectPublicKeyInfoRef;

const PEM_PREFIX: &[u8] = b"-----BEGIN";

/// Decode a trusted public key file into the bytes handed to the verifier
pub fn parse_public_key(raw: &[u8]) -> Result<Vec<u8>> {
    let trimmed = raw.trim_ascii();
    if trimmed.is_empty() {
        return Err(Error::KeyFormatInvalid("key file is empty".into()));
    }

    // Only text encodings are trimmed; raw keys may legitimately end in whitespace bytes
    let der = if trimmed.starts_with(PEM_PREFIX) {
        let (_label, der) = der::pem::decode_vec(trimmed)
            .map_err(|e| Error::KeyFormatInvalid(format!("PEM decode failed: {e}")))?;
        der
    } else {
        decode_base64_text(trimmed).unwrap_or_else(|| raw.to_vec())
    };

    if der.len() > MAX_PUBLIC_KEY_SIZE {
        return Err(Error::KeyFormatInvalid(format!(
            "key too large: {} bytes (maximum: {MAX_PUBLIC_KEY_SIZE} bytes)",
            der.len()
        )));
    }

    Ok(unwrap_spki(&der).unwrap_or(der))
}

/// Standard base64 text, possibly wrapped over several lines
fn decode_base64_text(text: &[u8]) -> Option<Vec<u8>> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    codec::decode(&compact, Alphabet::Standard, MAX_PUBLIC_KEY_SIZE).ok()
}

/// Extract the subject public key from a DER `SubjectPublicKeyInfo`
fn unwrap_spki(der: &[u8]) -> Option<Vec<u8>> {
    let spki = SubjectPublicKeyInfoRef::from_der(der).ok()?;
    spki.subject_public_key.as_bytes().map(<[u8]>::to_vec)
}
