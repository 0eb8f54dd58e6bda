use crate::algorithm::{AlgorithmType, SignatureVerifier};
use crate::claims::{
    ClaimsValidation, validate_algorithm, validate_expiration, validate_issued_at,
    validate_issuer, validate_not_before, validate_type,
};
use crate::error::Error;
use crate::outcome::ValidationResult;
use crate::token::DecodedToken;
use std::sync::Arc;

/// Token validator
///
/// Holds the trust anchor (public key and issuer) and the pinned signature
/// scheme. The validator is configured once and can be reused for any number
/// of tokens; validation never mutates it.
#[derive(Clone)]
pub struct TokenValidator {
    config_verifier: Arc<dyn SignatureVerifier>,
    config_claims: ClaimsValidation,
    config_key: Arc<[u8]>,
    config_issuer: Arc<[u8]>,
}

impl TokenValidator {
    /// Create a new validator pinned to EdDSA with default claim checks
    pub fn new(public_key: &[u8], issuer: &[u8]) -> Self {
        Self {
            config_verifier: Arc::new(AlgorithmType::EdDSA),
            config_claims: ClaimsValidation::default(),
            config_key: public_key.into(),
            config_issuer: issuer.into(),
        }
    }

    /// Configure the signature scheme
    pub fn verifier(&mut self, verifier: Arc<dyn SignatureVerifier>) -> &mut Self {
        self.config_verifier = verifier;
        self
    }

    /// Configure claims validation
    pub fn claims(&mut self, config: ClaimsValidation) -> &mut Self {
        self.config_claims = config;
        self
    }

    /// Finish configuration
    pub fn build(&mut self) -> Self {
        self.clone()
    }

    /// The pinned algorithm
    pub fn algorithm(&self) -> AlgorithmType {
        self.config_verifier.algorithm()
    }

    /// Validate a token
    ///
    /// `now` is the current time in seconds since the Unix epoch, or `None`
    /// when no trusted clock is available. Stages run in a fixed order and
    /// the first failure decides the result.
    pub fn validate(&self, token: &[u8], now: Option<i64>) -> ValidationResult {
        match self.run_stages(token, now) {
            Ok(()) => ValidationResult::TokenValid,
            Err(outcome) => outcome,
        }
    }

    fn run_stages(&self, token: &[u8], now: Option<i64>) -> Result<(), ValidationResult> {
        // 1. Split, decode and parse
        let decoded = DecodedToken::decode(token).map_err(reject(ValidationResult::InvalidFormat))?;

        // 2. Verify signature over the verbatim header.payload bytes
        self.config_verifier
            .verify(
                decoded.signed_message,
                &decoded.signature,
                &self.config_key,
            )
            .map_err(reject(ValidationResult::InvalidSignature))?;

        // 3-5. Header and identity claims
        validate_type(&decoded.header, &self.config_claims)
            .map_err(reject(ValidationResult::InvalidTypClaim))?;
        validate_algorithm(&decoded.header, self.algorithm())
            .map_err(reject(ValidationResult::InvalidAlgClaim))?;
        validate_issuer(&decoded.claims, &self.config_issuer)
            .map_err(reject(ValidationResult::InvalidIssClaim))?;

        // 6. Remaining checks need a trusted clock
        let Some(now) = now else {
            tracing::debug!("no trusted time source, skipping temporal claims");
            return Err(ValidationResult::RtcNotAvailable);
        };

        // 7-9. Temporal claims
        validate_issued_at(&decoded.claims, now, &self.config_claims)
            .map_err(reject(ValidationResult::InvalidIatClaim))?;
        validate_not_before(&decoded.claims, now, &self.config_claims)
            .map_err(reject(ValidationResult::InvalidNbfClaim))?;
        validate_expiration(&decoded.claims, now)
            .map_err(reject(ValidationResult::InvalidExpClaim))?;

        Ok(())
    }
}

/// Map a stage error to its outcome, logging the detail
fn reject(outcome: ValidationResult) -> impl FnOnce(Error) -> ValidationResult {
    move |error| {
        tracing::debug!(reason = %error, "{outcome}");
        outcome
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithm", &self.algorithm())
            .field("claims", &self.config_claims)
            .field("issuer", &String::from_utf8_lossy(&self.config_issuer))
            .finish_non_exhaustive()
    }
}
