//! Base64 encoding/decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate. Both alphabets decode with
//! padding present, partially present or absent; anything else outside the
//! alphabet is rejected rather than skipped.

use crate::error::{Error, Result};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose},
};

/// Base64 alphabet variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// `+` and `/`, encodes with `=` padding
    Standard,
    /// `-` and `_`, encodes without padding
    UrlSafe,
}

const DECODE_CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::RequireNone);

const STANDARD_DECODER: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, DECODE_CONFIG);
const URL_SAFE_DECODER: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, DECODE_CONFIG);

impl Alphabet {
    fn decoder(self) -> &'static GeneralPurpose {
        match self {
            Alphabet::Standard => &STANDARD_DECODER,
            Alphabet::UrlSafe => &URL_SAFE_DECODER,
        }
    }
}

/// Decode base64 text to bytes with maximum output size
pub fn decode(input: &[u8], alphabet: Alphabet, max_size: usize) -> Result<Vec<u8>> {
    let symbols = strip_padding(input)?;

    // Validate decoded size before allocating to prevent DoS attacks
    let decoded_len = symbols.len() / 4 * 3 + (symbols.len() % 4).saturating_sub(1);
    if decoded_len > max_size {
        return Err(Error::FormatInvalidBase64(format!(
            "Decoded size exceeds limit: {decoded_len} bytes (max: {max_size})"
        )));
    }

    alphabet
        .decoder()
        .decode(symbols)
        .map_err(|e| Error::FormatInvalidBase64(format!("{alphabet:?} decode failed: {e}")))
}

/// Encode bytes as base64 text
///
/// The standard alphabet pads with `=`, the URL-safe one does not.
pub fn encode(input: impl AsRef<[u8]>, alphabet: Alphabet) -> String {
    match alphabet {
        Alphabet::Standard => general_purpose::STANDARD.encode(input),
        Alphabet::UrlSafe => general_purpose::URL_SAFE_NO_PAD.encode(input),
    }
}

/// Remove trailing `=` padding, rejecting more than the symbol count needs
fn strip_padding(input: &[u8]) -> Result<&[u8]> {
    let symbols_len = input
        .iter()
        .rposition(|&b| b != b'=')
        .map_or(0, |last| last + 1);
    let padding = input.len() - symbols_len;
    let needed = (4 - symbols_len % 4) % 4;

    if padding > needed {
        return Err(Error::FormatInvalidBase64(format!(
            "Excess padding: {padding} '=' after {symbols_len} symbols"
        )));
    }

    Ok(&input[..symbols_len])
}
