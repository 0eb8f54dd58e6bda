/// Outcome of validating one token
///
/// Exactly one value is produced per validation. Stages run in declaration
/// order and the first failing stage decides the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum ValidationResult {
    InvalidFormat,
    InvalidSignature,
    InvalidTypClaim,
    InvalidAlgClaim,
    InvalidIssClaim,
    InvalidIatClaim,
    InvalidNbfClaim,
    InvalidExpClaim,
    RtcNotAvailable,
    TokenValid,
}

impl ValidationResult {
    /// Whether the token may be trusted
    pub const fn is_valid(self) -> bool {
        matches!(self, ValidationResult::TokenValid)
    }

    /// Short human-readable diagnostic
    pub const fn message(self) -> &'static str {
        match self {
            ValidationResult::InvalidFormat => "Invalid token format",
            ValidationResult::InvalidSignature => "Invalid token signature",
            ValidationResult::InvalidTypClaim => "Invalid token type",
            ValidationResult::InvalidAlgClaim => "Invalid token algorithm",
            ValidationResult::InvalidIssClaim => "Invalid token issuer",
            ValidationResult::InvalidIatClaim => "Invalid token iat claim",
            ValidationResult::InvalidNbfClaim => "Invalid token nbf claim",
            ValidationResult::InvalidExpClaim => "Invalid token exp claim",
            ValidationResult::RtcNotAvailable => "RTC not available",
            ValidationResult::TokenValid => "Token is valid",
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_token_valid_is_valid() {
        assert!(ValidationResult::TokenValid.is_valid());
        assert!(!ValidationResult::RtcNotAvailable.is_valid());
        assert!(!ValidationResult::InvalidFormat.is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ValidationResult::InvalidIatClaim.to_string(),
            "Invalid token iat claim"
        );
    }
}
