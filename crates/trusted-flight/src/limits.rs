//! Size limit constants for input validation

/// Maximum length for a token (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size of a token file on disk, including trailing whitespace
pub(crate) const MAX_TOKEN_FILE_SIZE: u64 = MAX_TOKEN_LENGTH as u64 + 64;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded header JSON (8KB)
/// Headers are typically small (< 1KB), but we allow reasonable margin
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (32KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 32 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes; Ed25519 and ECDSA are far smaller
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum size for Base64URL-encoded signature string (1.5KB)
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for algorithm (alg) names
pub(crate) const MAX_ALG_LENGTH: usize = 16;

// ============================================================================
// Timestamp bounds
// ============================================================================

/// Minimum valid Unix timestamp (1970-01-01 00:00:00 UTC)
pub(crate) const MIN_TIMESTAMP: i64 = 0;

/// Maximum valid Unix timestamp (2100-01-01 00:00:00 UTC)
pub(crate) const MAX_TIMESTAMP: i64 = 4_102_444_800;

/// Maximum issued-at leeway (300 seconds = 5 minutes)
/// Prevents leeway from effectively disabling the future-issuance check
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;

// ============================================================================
// Firmware storage limits
// ============================================================================

/// Maximum inflated size of a firmware storage entry (64KB)
pub(crate) const MAX_DECOMPRESSED_SIZE: usize = 64 * 1024;

/// Maximum size of a trusted public key file after decoding (16KB)
pub(crate) const MAX_PUBLIC_KEY_SIZE: usize = 16 * 1024;

// ============================================================================
// Event log limits
// ============================================================================

/// Maximum length of a single event log message in bytes
pub(crate) const MAX_LOG_MESSAGE_LENGTH: usize = 64;
