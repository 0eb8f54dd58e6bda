//! Claims validation for flight authorization tokens
//!
//! This module holds the claim accessors over the decoded payload and the
//! individual header/payload checks the validator runs in order: type,
//! algorithm, issuer, then the temporal claims (iat, nbf, exp).

use crate::algorithm::AlgorithmType;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::header::TokenHeader;
use crate::limits::MAX_CLOCK_SKEW_SECONDS;
use crate::utils::bounds::{apply_clock_skew, validate_timestamp_bounds};

/// Registered claims carried in the token payload
#[derive(Debug, Clone)]
pub(crate) struct Claims {
    document: Document,
}

impl Claims {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }

    /// Issuer (iss)
    pub(crate) fn issuer(&self) -> Result<Option<&str>> {
        self.document.string("iss")
    }

    /// Issued At (iat)
    pub(crate) fn issued_at(&self) -> Result<Option<i64>> {
        self.document.timestamp("iat")
    }

    /// Not Before (nbf)
    pub(crate) fn not_before(&self) -> Result<Option<i64>> {
        self.document.timestamp("nbf")
    }

    /// Expiration Time (exp)
    pub(crate) fn expiration(&self) -> Result<Option<i64>> {
        self.document.timestamp("exp")
    }
}

/// Configuration for claims validation
#[derive(Debug, Clone)]
pub struct ClaimsValidation {
    expected_type: String,
    issued_at_leeway: u64,
    require_nbf: bool,
}

impl Default for ClaimsValidation {
    fn default() -> Self {
        Self {
            expected_type: "JWT".into(),
            issued_at_leeway: 0,
            require_nbf: false,
        }
    }
}

impl ClaimsValidation {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the literal the header `typ` must equal (default `"JWT"`)
    pub fn expected_type(mut self, typ: impl Into<String>) -> Self {
        self.expected_type = typ.into();
        self
    }

    /// Allow `iat` to lie up to `seconds` in the future
    ///
    /// # Security
    /// Limited to 300 seconds. Larger values are rejected by [`Self::check`],
    /// and a validator configured with one fails every token at the `iat`
    /// stage.
    pub fn issued_at_leeway(mut self, seconds: u64) -> Self {
        self.issued_at_leeway = seconds;
        self
    }

    /// Reject tokens that carry no `nbf` claim
    pub fn require_not_before(mut self) -> Self {
        self.require_nbf = true;
        self
    }

    /// Validate configuration bounds to prevent security bypass
    pub fn check(&self) -> Result<()> {
        if self.issued_at_leeway > MAX_CLOCK_SKEW_SECONDS {
            return Err(Error::ClockSkewTooLarge {
                value: self.issued_at_leeway,
                max: MAX_CLOCK_SKEW_SECONDS,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_type(header: &TokenHeader, config: &ClaimsValidation) -> Result<()> {
    let typ = header
        .token_type()?
        .ok_or_else(|| Error::TokenMissingClaim("typ".into()))?;

    if typ != config.expected_type {
        return Err(Error::TokenTypeMismatch {
            expected: config.expected_type.clone(),
            found: typ.into(),
        });
    }
    Ok(())
}

/// The header `alg` must name the pinned algorithm exactly
pub(crate) fn validate_algorithm(header: &TokenHeader, pinned: AlgorithmType) -> Result<()> {
    let alg = header
        .algorithm()?
        .ok_or_else(|| Error::TokenMissingClaim("alg".into()))?;

    let declared = AlgorithmType::from_str(alg)?;
    if declared != pinned {
        return Err(Error::AlgorithmMismatch {
            expected: pinned.to_string(),
            found: declared.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_issuer(claims: &Claims, trusted_issuer: &[u8]) -> Result<()> {
    let iss = claims
        .issuer()?
        .ok_or_else(|| Error::TokenMissingClaim("iss".into()))?;

    if iss.as_bytes() != trusted_issuer {
        return Err(Error::TokenIssuerMismatch(iss.into()));
    }
    Ok(())
}

pub(crate) fn validate_issued_at(
    claims: &Claims,
    now: i64,
    config: &ClaimsValidation,
) -> Result<()> {
    // An oversized leeway would disable this check entirely
    config.check()?;

    let iat = claims
        .issued_at()?
        .ok_or_else(|| Error::TokenMissingClaim("iat".into()))?;
    validate_timestamp_bounds(iat)?;

    let now_with_leeway = apply_clock_skew(now, config.issued_at_leeway, true)?;
    if iat > now_with_leeway {
        return Err(Error::TokenIssuedInFuture {
            issued_at: iat,
            now,
            leeway: config.issued_at_leeway,
        });
    }
    Ok(())
}

pub(crate) fn validate_not_before(
    claims: &Claims,
    now: i64,
    config: &ClaimsValidation,
) -> Result<()> {
    let Some(nbf) = claims.not_before()? else {
        if config.require_nbf {
            return Err(Error::TokenMissingClaim("nbf".into()));
        }
        return Ok(());
    };
    validate_timestamp_bounds(nbf)?;

    if now < nbf {
        return Err(Error::TokenNotYetValid {
            not_before: nbf,
            now,
        });
    }
    Ok(())
}

pub(crate) fn validate_expiration(claims: &Claims, now: i64) -> Result<()> {
    let exp = claims
        .expiration()?
        .ok_or_else(|| Error::TokenMissingClaim("exp".into()))?;
    validate_timestamp_bounds(exp)?;

    if now >= exp {
        return Err(Error::TokenExpired {
            expired_at: exp,
            now,
        });
    }
    Ok(())
}
