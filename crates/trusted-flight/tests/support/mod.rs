//! Shared fixtures for integration tests
//!
//! Tokens are signed with key pairs generated per test, so every signature
//! is real. Firmware images are gzip-compressed in memory the same way the
//! build packs them, and the token lives in a temporary directory.
//!
//! ```rust,ignore
//! let signer = Signer::ed25519();
//! let token = TokenBuilder::new().standard_valid_claims(NOW).sign(&signer);
//! ```

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    ECDSA_P256_SHA256_FIXED_SIGNING, EcdsaKeyPair, Ed25519KeyPair, KeyPair,
};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use trusted_flight::{
    Alphabet, Clock, LocalFilesystem, RomFs, TrustedFlight, TrustedFlightConfig, encode_base64,
};

pub const ISSUER: &str = "https://aerobridge.example";
pub const NOW: i64 = 1_760_000_000;

pub const KEY_PATH: &str = "trusted_flight/key.pub";
pub const ISSUER_PATH: &str = "trusted_flight/token_issuer";
pub const TOKEN_PATH: &str = "trusted_flight/token";

/// Signing half of a trust anchor
pub enum Signer {
    Ed25519(Ed25519KeyPair),
    Es256(EcdsaKeyPair),
}

impl Signer {
    pub fn ed25519() -> Self {
        let pkcs8 = Ed25519KeyPair::generate_pkcs8(&SystemRandom::new()).unwrap();
        Self::Ed25519(Ed25519KeyPair::from_pkcs8(pkcs8.as_ref()).unwrap())
    }

    pub fn es256() -> Self {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &rng).unwrap();
        Self::Es256(
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8.as_ref()).unwrap(),
        )
    }

    /// Bare public key (32-byte Ed25519 key or uncompressed SEC1 point)
    pub fn public_key(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(keypair) => keypair.public_key().as_ref().to_vec(),
            Self::Es256(keypair) => keypair.public_key().as_ref().to_vec(),
        }
    }

    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::Ed25519(keypair) => keypair.sign(message).as_ref().to_vec(),
            Self::Es256(keypair) => keypair
                .sign(&SystemRandom::new(), message)
                .unwrap()
                .as_ref()
                .to_vec(),
        }
    }
}

/// Fluent token construction with raw JSON values
///
/// Fields keep insertion order so tests control the exact encoded bytes.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    header: Vec<(String, String)>,
    claims: Vec<(String, String)>,
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuilder {
    /// Header `{"alg":"EdDSA","typ":"JWT"}` and no claims
    pub fn new() -> Self {
        Self {
            header: vec![
                ("alg".into(), r#""EdDSA""#.into()),
                ("typ".into(), r#""JWT""#.into()),
            ],
            claims: Vec::new(),
        }
    }

    /// Claims accepted at `now`: trusted issuer, issued and valid a minute
    /// ago, expiring in an hour
    pub fn standard_valid_claims(self, now: i64) -> Self {
        self.claim("iss", &format!(r#""{ISSUER}""#))
            .claim("iat", &(now - 60).to_string())
            .claim("nbf", &(now - 60).to_string())
            .claim("exp", &(now + 3600).to_string())
    }

    /// Set a header parameter to a raw JSON value
    pub fn header(mut self, name: &str, json: &str) -> Self {
        set(&mut self.header, name, json);
        self
    }

    pub fn without_header(mut self, name: &str) -> Self {
        self.header.retain(|(key, _)| key != name);
        self
    }

    /// Set a claim to a raw JSON value
    pub fn claim(mut self, name: &str, json: &str) -> Self {
        set(&mut self.claims, name, json);
        self
    }

    pub fn without_claim(mut self, name: &str) -> Self {
        self.claims.retain(|(key, _)| key != name);
        self
    }

    pub fn header_json(&self) -> String {
        object(&self.header)
    }

    pub fn payload_json(&self) -> String {
        object(&self.claims)
    }

    pub fn sign(&self, signer: &Signer) -> String {
        sign_raw(&self.header_json(), &self.payload_json(), signer)
    }
}

fn set(fields: &mut Vec<(String, String)>, name: &str, json: &str) {
    match fields.iter_mut().find(|(key, _)| key == name) {
        Some(field) => field.1 = json.into(),
        None => fields.push((name.into(), json.into())),
    }
}

fn object(fields: &[(String, String)]) -> String {
    let members: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!(r#""{key}":{value}"#))
        .collect();
    format!("{{{}}}", members.join(","))
}

/// Sign arbitrary header and payload text, valid JSON or not
pub fn sign_raw(header: &str, payload: &str, signer: &Signer) -> String {
    let signing_input = format!(
        "{}.{}",
        encode_base64(header, Alphabet::UrlSafe),
        encode_base64(payload, Alphabet::UrlSafe)
    );
    let signature = signer.sign(signing_input.as_bytes());
    format!(
        "{signing_input}.{}",
        encode_base64(&signature, Alphabet::UrlSafe)
    )
}

/// Decoded signature bytes of a compact token
pub fn signature_bytes(token: &str) -> Vec<u8> {
    let (_, signature) = token.rsplit_once('.').unwrap();
    trusted_flight::decode_base64(signature.as_bytes(), Alphabet::UrlSafe, 1024).unwrap()
}

/// Flip the `mask` bits of decoded signature byte `index`
pub fn flip_signature_byte(token: &str, index: usize, mask: u8) -> String {
    let (signing_input, _) = token.rsplit_once('.').unwrap();
    let mut bytes = signature_bytes(token);
    bytes[index] ^= mask;
    format!(
        "{signing_input}.{}",
        encode_base64(&bytes, Alphabet::UrlSafe)
    )
}

/// Flip one bit in the first decoded byte of the signature
pub fn corrupt_signature(token: &str) -> String {
    flip_signature_byte(token, 0, 0x01)
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Firmware image holding `public_key` and `issuer` at the default paths
pub fn firmware(public_key: &[u8], issuer: &str) -> RomFs {
    let mut romfs = RomFs::new();
    romfs
        .insert(KEY_PATH, gzip(public_key))
        .insert(ISSUER_PATH, gzip(issuer.as_bytes()));
    romfs
}

/// Clock pinned to a fixed second, or one that was never set
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Option<i64>);

impl FixedClock {
    pub fn at(seconds: i64) -> Self {
        Self(Some(seconds))
    }

    pub fn unset() -> Self {
        Self(None)
    }
}

impl Clock for FixedClock {
    fn utc_micros(&self) -> Option<u64> {
        self.0
            .and_then(|seconds| u64::try_from(seconds).ok())
            .map(|seconds| seconds * 1_000_000)
    }
}

/// Temporary vehicle filesystem
pub struct Vehicle {
    dir: TempDir,
}

impl Vehicle {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("trusted_flight")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn upload_token(&self, token: &str) {
        std::fs::write(self.dir.path().join(TOKEN_PATH), token).unwrap();
    }

    pub fn filesystem(&self) -> LocalFilesystem {
        LocalFilesystem::new(self.dir.path())
    }

    /// Orchestrator over this filesystem with default paths
    pub fn trusted_flight(&self, romfs: RomFs, clock: FixedClock) -> TrustedFlight {
        TrustedFlight::new(TrustedFlightConfig::default(), romfs, self.filesystem(), clock)
    }
}
