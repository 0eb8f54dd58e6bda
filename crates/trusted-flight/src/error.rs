//! Errors for trusted-flight

use thiserror::Error;

/// Trusted Flight Errors
///
/// Token-level variants explain *why* a validation stage failed. The
/// validator collapses them into a [`ValidationResult`](crate::ValidationResult)
/// and logs the detail; the orchestrator-level variants surface to callers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid token format: expected three non-empty parts separated by '.'")]
    FormatInvalid,

    #[error("Base64 decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Decoded {0} is not a JSON object")]
    FormatNotObject(&'static str),

    #[error("Signature Base64URL string too large: {size} bytes (maximum: {max} bytes)")]
    SignatureB64TooLarge { size: usize, max: usize },

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("Algorithm '{found}' does not match pinned algorithm '{expected}'")]
    AlgorithmMismatch { expected: String, found: String },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Token type '{found}' does not match expected '{expected}'")]
    TokenTypeMismatch { expected: String, found: String },

    #[error("Token issuer '{0}' is not trusted")]
    TokenIssuerMismatch(String),

    #[error("Required token claim '{0}' is missing")]
    TokenMissingClaim(String),

    #[error("Token claim '{claim}' has wrong type (expected {expected})")]
    ClaimTypeMismatch {
        claim: String,
        expected: &'static str,
    },

    #[error("Token expired at {expired_at} (now: {now})")]
    TokenExpired { expired_at: i64, now: i64 },

    #[error("Token not valid until {not_before} (now: {now})")]
    TokenNotYetValid { not_before: i64, now: i64 },

    #[error("Token issued in future at {issued_at} (now: {now}, leeway: {leeway}s)")]
    TokenIssuedInFuture {
        issued_at: i64,
        now: i64,
        leeway: u64,
    },

    #[error("Timestamp out of bounds: {value} (valid range: {min} to {max})")]
    TimestampOutOfBounds { value: i64, min: i64, max: i64 },

    #[error("Integer overflow in timestamp arithmetic")]
    TimestampOverflow,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Clock skew too large: {value} seconds (maximum: {max} seconds)")]
    ClockSkewTooLarge { value: u64, max: u64 },

    #[error("Invalid public key: {0}")]
    KeyFormatInvalid(String),

    // ============================================================================
    // Platform Errors
    // ============================================================================
    #[error("Firmware storage entry '{path}' not found")]
    StorageNotFound { path: String },

    #[error("Firmware storage entry '{path}' is corrupt: {reason}")]
    StorageCorrupt { path: String, reason: String },

    #[error("Firmware storage entry '{path}' too large: more than {max} bytes")]
    StorageTooLarge { path: String, max: usize },

    #[error("Cannot read file: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read file {path}: {reason}")]
    FileUnreadable { path: String, reason: String },

    #[error("File {path} is empty")]
    FileEmpty { path: String },

    #[error("File {path} too large: {size} bytes (maximum: {max} bytes)")]
    FileTooLarge { path: String, size: u64, max: u64 },

    #[error("Cannot allocate buffer of {size} bytes")]
    AllocationFailed { size: usize },

    // ============================================================================
    // Lifecycle Errors
    // ============================================================================
    #[error("Initialization is not done yet")]
    NotInitialized,

    #[error("A trusted flight module is already installed")]
    AlreadyInstalled,
}

/// Result type alias for trusted-flight operations
pub type Result<T> = std::result::Result<T, Error>;
