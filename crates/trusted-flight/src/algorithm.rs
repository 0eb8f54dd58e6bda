//! Signature algorithms for token verification
use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

use aws_lc_rs::signature::{self, UnparsedPublicKey};
use der::asn1::UintRef;
use der::{Reader, SliceReader};

/// Algorithm identifier from the token header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    EdDSA,
    ES256,
    ES384,
    ES512,
    RS256,
    RS384,
    RS512,
}

impl AlgorithmType {
    pub(crate) fn from_str(s: &str) -> Result<Self> {
        // Validate algorithm string length before parsing to prevent DoS
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::AlgorithmUnsupported(format!(
                "Algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        match s {
            "none" => Err(Error::AlgorithmNoneRejected),
            "EdDSA" => Ok(AlgorithmType::EdDSA),
            "ES256" => Ok(AlgorithmType::ES256),
            "ES384" => Ok(AlgorithmType::ES384),
            "ES512" => Ok(AlgorithmType::ES512),
            "RS256" => Ok(AlgorithmType::RS256),
            "RS384" => Ok(AlgorithmType::RS384),
            "RS512" => Ok(AlgorithmType::RS512),
            _ => Err(Error::AlgorithmUnsupported(s.into())),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::EdDSA => "EdDSA",
            AlgorithmType::ES256 => "ES256",
            AlgorithmType::ES384 => "ES384",
            AlgorithmType::ES512 => "ES512",
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::RS384 => "RS384",
            AlgorithmType::RS512 => "RS512",
        }
    }

    /// Get the verification algorithm for signature verification
    ///
    /// Note: ECDSA signatures use IEEE P1363 format (fixed-length R||S),
    /// not ASN.1 DER encoding, as per RFC 7518 Section 3.4.
    fn verification_algorithm(&self) -> &'static dyn signature::VerificationAlgorithm {
        match self {
            AlgorithmType::EdDSA => &signature::ED25519,
            AlgorithmType::ES256 => &signature::ECDSA_P256_SHA256_FIXED,
            AlgorithmType::ES384 => &signature::ECDSA_P384_SHA384_FIXED,
            AlgorithmType::ES512 => &signature::ECDSA_P521_SHA512_FIXED,
            AlgorithmType::RS256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            AlgorithmType::RS384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            AlgorithmType::RS512 => &signature::RSA_PKCS1_2048_8192_SHA512,
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Signature scheme used to check a token against the trusted key
///
/// The validator never derives the scheme from the token header: whatever
/// implements this trait is pinned by the deployment, and the header `alg`
/// claim must merely agree with [`SignatureVerifier::algorithm`].
pub trait SignatureVerifier: Send + Sync {
    /// The algorithm this verifier implements
    fn algorithm(&self) -> AlgorithmType;

    /// Verify `signature` over `message` with `public_key`
    ///
    /// Returns [`Error::SignatureInvalid`] on any rejection, including a
    /// public key the backend cannot parse.
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()>;

    /// Check that `public_key` has the shape this scheme expects
    ///
    /// Called once when the trust anchor is loaded, so a malformed key
    /// fails init instead of rejecting every token as badly signed.
    fn check_key(&self, public_key: &[u8]) -> Result<()> {
        let _ = public_key;
        Ok(())
    }
}

/// Software verification backed by `aws-lc-rs`
///
/// Key formats: Ed25519 takes the 32-byte public key, ECDSA the
/// uncompressed SEC1 point, RSA a DER `RSAPublicKey`.
impl SignatureVerifier for AlgorithmType {
    fn algorithm(&self) -> AlgorithmType {
        *self
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()> {
        UnparsedPublicKey::new(self.verification_algorithm(), public_key)
            .verify(message, signature)
            .map_err(|_| Error::SignatureInvalid)
    }

    fn check_key(&self, public_key: &[u8]) -> Result<()> {
        let expected = match self {
            AlgorithmType::EdDSA => 32,
            AlgorithmType::ES256 => 65,
            AlgorithmType::ES384 => 97,
            AlgorithmType::ES512 => 133,
            AlgorithmType::RS256 | AlgorithmType::RS384 | AlgorithmType::RS512 => {
                return check_rsa_public_key(public_key);
            }
        };

        if public_key.len() != expected {
            return Err(Error::KeyFormatInvalid(format!(
                "{self} key must be {expected} bytes, got {}",
                public_key.len()
            )));
        }
        // Uncompressed SEC1 point
        if *self != AlgorithmType::EdDSA && public_key[0] != 0x04 {
            return Err(Error::KeyFormatInvalid(format!(
                "{self} key is not an uncompressed point"
            )));
        }
        Ok(())
    }
}

/// PKCS#1 `RSAPublicKey ::= SEQUENCE { modulus INTEGER, publicExponent INTEGER }`
fn check_rsa_public_key(public_key: &[u8]) -> Result<()> {
    let parse = || -> der::Result<()> {
        let mut reader = SliceReader::new(public_key)?;
        reader.sequence(|seq| {
            let _modulus: UintRef<'_> = seq.decode()?;
            let _exponent: UintRef<'_> = seq.decode()?;
            Ok(())
        })?;
        reader.finish(())
    };
    parse().map_err(|e| Error::KeyFormatInvalid(format!("not a DER RSAPublicKey: {e}")))
}
