//! Structural decoding of compact tokens
//!
//! A token is `header "." payload "." signature`, each part URL-safe base64.
//! Segment boundaries are located on the raw bytes before anything is
//! decoded, and the signed message is kept as a borrowed slice of the
//! caller's buffer: re-encoding the parsed header and payload would not
//! reproduce the bytes the issuer signed.

use crate::claims::Claims;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::header::TokenHeader;
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::utils::codec::{self, Alphabet};
use std::ops::Range;

const DELIMITER: u8 = b'.';

/// Byte ranges of the three token parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segments {
    pub header: Range<usize>,
    pub payload: Range<usize>,
    pub signature: Range<usize>,
}

impl Segments {
    /// Locate exactly two delimiters giving three non-empty segments
    pub(crate) fn locate(token: &[u8]) -> Result<Self> {
        let mut delimiters = token
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == DELIMITER)
            .map(|(i, _)| i);

        let first = delimiters.next().ok_or(Error::FormatInvalid)?;
        let second = delimiters.next().ok_or(Error::FormatInvalid)?;
        if delimiters.next().is_some() {
            return Err(Error::FormatInvalid);
        }

        let segments = Self {
            header: 0..first,
            payload: first + 1..second,
            signature: second + 1..token.len(),
        };

        if segments.header.is_empty() || segments.payload.is_empty() || segments.signature.is_empty()
        {
            return Err(Error::FormatInvalid);
        }

        Ok(segments)
    }

    /// Range covering `header "." payload`
    pub(crate) fn signed_message(&self) -> Range<usize> {
        self.header.start..self.payload.end
    }
}

/// Decoded token parts, borrowing the signed message from the token buffer
#[derive(Debug)]
pub(crate) struct DecodedToken<'t> {
    pub header: TokenHeader,
    pub claims: Claims,
    pub signature: Vec<u8>,
    pub signed_message: &'t [u8],
}

impl<'t> DecodedToken<'t> {
    /// Split, decode and parse a token
    pub(crate) fn decode(token: &'t [u8]) -> Result<Self> {
        // Validate token length before scanning
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let segments = Segments::locate(token)?;

        // Validate signature Base64URL size before decoding
        if segments.signature.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Error::SignatureB64TooLarge {
                size: segments.signature.len(),
                max: MAX_SIGNATURE_B64_SIZE,
            });
        }

        let header_json = codec::decode(
            &token[segments.header.clone()],
            Alphabet::UrlSafe,
            MAX_DECODED_HEADER_SIZE,
        )?;
        let header = TokenHeader::new(Document::parse(&header_json, "header")?);

        let payload_json = codec::decode(
            &token[segments.payload.clone()],
            Alphabet::UrlSafe,
            MAX_DECODED_PAYLOAD_SIZE,
        )?;
        let claims = Claims::new(Document::parse(&payload_json, "payload")?);

        let signature = codec::decode(
            &token[segments.signature.clone()],
            Alphabet::UrlSafe,
            MAX_DECODED_SIGNATURE_SIZE,
        )?;

        Ok(Self {
            header,
            claims,
            signature,
            signed_message: &token[segments.signed_message()],
        })
    }
}
