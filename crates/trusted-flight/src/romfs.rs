//! Read-only firmware storage
//!
//! Trust anchors are baked into the firmware image as gzip-compressed
//! entries and inflated on demand.

use crate::error::{Error, Result};
use crate::limits::MAX_DECOMPRESSED_SIZE;
use flate2::read::GzDecoder;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Read;

/// Read-only storage the trusted key and issuer are loaded from
pub trait FirmwareStorage: Send + Sync {
    /// Load and decompress the entry at `path`
    fn load(&self, path: &str) -> Result<Vec<u8>>;
}

/// In-image filesystem of gzip-compressed entries
#[derive(Debug, Clone, Default)]
pub struct RomFs {
    entries: HashMap<String, Cow<'static, [u8]>>,
}

impl RomFs {
    /// Create an empty image
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an image from `(path, gzip bytes)` pairs, e.g. `include_bytes!` output
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static [u8])>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(path, data)| (path.to_string(), Cow::Borrowed(data)))
                .collect(),
        }
    }

    /// Add a gzip-compressed entry
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        compressed: impl Into<Cow<'static, [u8]>>,
    ) -> &mut Self {
        self.entries.insert(path.into(), compressed.into());
        self
    }

    /// Decompress gzip data with bounded output size
    ///
    /// Prevents compression bombs by stopping as soon as the inflated data
    /// exceeds `MAX_DECOMPRESSED_SIZE`.
    fn decompress(path: &str, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = GzDecoder::new(data);
        let mut decompressed = Vec::new();
        let mut buffer = [0u8; 4096];

        loop {
            let bytes_read = decoder.read(&mut buffer).map_err(|e| Error::StorageCorrupt {
                path: path.into(),
                reason: e.to_string(),
            })?;

            if bytes_read == 0 {
                break;
            }

            if decompressed.len().saturating_add(bytes_read) > MAX_DECOMPRESSED_SIZE {
                return Err(Error::StorageTooLarge {
                    path: path.into(),
                    max: MAX_DECOMPRESSED_SIZE,
                });
            }

            decompressed.extend_from_slice(&buffer[..bytes_read]);
        }

        Ok(decompressed)
    }
}

impl FirmwareStorage for RomFs {
    fn load(&self, path: &str) -> Result<Vec<u8>> {
        let compressed = self.entries.get(path).ok_or_else(|| Error::StorageNotFound {
            path: path.into(),
        })?;
        Self::decompress(path, compressed.as_ref())
    }
}
