//! Decoded JSON documents (token header and payload)

use crate::error::{Error, Result};
use miniserde::json::{self, Number, Object, Value};

/// A parsed JSON object with typed field lookup
///
/// Lookups distinguish a missing field (`Ok(None)`) from a field holding
/// the wrong JSON type (`Err(ClaimTypeMismatch)`), so callers can decide
/// whether absence is acceptable for a given claim.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    fields: Object,
}

impl Document {
    /// Parse decoded segment bytes as a JSON object
    ///
    /// `segment` names the token part for error messages.
    pub(crate) fn parse(bytes: &[u8], segment: &'static str) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::FormatInvalidJson(format!("{segment} is not UTF-8: {e}")))?;

        let value: Value = json::from_str(text)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse {segment}: {e}")))?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(Error::FormatNotObject(segment)),
        }
    }

    /// Look up a string field
    pub(crate) fn string(&self, key: &str) -> Result<Option<&str>> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(type_mismatch(key, "string")),
        }
    }

    /// Look up a NumericDate field as whole seconds
    ///
    /// Fractional seconds are truncated toward negative infinity.
    pub(crate) fn timestamp(&self, key: &str) -> Result<Option<i64>> {
        let number = match self.fields.get(key) {
            None => return Ok(None),
            Some(Value::Number(n)) => n,
            Some(_) => return Err(type_mismatch(key, "number")),
        };

        let seconds = match *number {
            Number::U64(n) => i64::try_from(n).map_err(|_| Error::TimestampOverflow)?,
            Number::I64(n) => n,
            Number::F64(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                f.floor() as i64
            }
            Number::F64(_) => return Err(Error::TimestampOverflow),
        };

        Ok(Some(seconds))
    }
}

fn type_mismatch(key: &str, expected: &'static str) -> Error {
    Error::ClaimTypeMismatch {
        claim: key.into(),
        expected,
    }
}
