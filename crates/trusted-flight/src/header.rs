use crate::document::Document;
use crate::error::Result;

/// Token header
///
/// Only `typ` and `alg` are consulted; other members are carried but ignored.
#[derive(Debug, Clone)]
pub(crate) struct TokenHeader {
    document: Document,
}

impl TokenHeader {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }

    /// Token type (typ)
    pub(crate) fn token_type(&self) -> Result<Option<&str>> {
        self.document.string("typ")
    }

    /// Signing algorithm (alg)
    pub(crate) fn algorithm(&self) -> Result<Option<&str>> {
        self.document.string("alg")
    }
}
