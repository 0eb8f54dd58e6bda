//! Filesystem access for the candidate token

use crate::error::{Error, Result};
use crate::limits::MAX_TOKEN_FILE_SIZE;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Filesystem the candidate token is read from
pub trait Filesystem: Send + Sync {
    /// Read the whole file at `path`
    ///
    /// Missing and empty files are both errors.
    fn load_file(&self, path: &str) -> Result<Vec<u8>>;
}

/// Files under a local root directory
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Filesystem for LocalFilesystem {
    fn load_file(&self, path: &str) -> Result<Vec<u8>> {
        let unreadable = |e: std::io::Error| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound { path: path.into() },
            _ => Error::FileUnreadable {
                path: path.into(),
                reason: e.to_string(),
            },
        };
        let too_large = |size: u64| Error::FileTooLarge {
            path: path.into(),
            size,
            max: MAX_TOKEN_FILE_SIZE,
        };

        let file = File::open(self.root.join(path)).map_err(unreadable)?;
        let size = file.metadata().map_err(unreadable)?.len();
        if size > MAX_TOKEN_FILE_SIZE {
            return Err(too_large(size));
        }

        let capacity = usize::try_from(size).map_err(|_| too_large(size))?;
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailed { size: capacity })?;

        // Bounded read in case the file grew after the size check
        file.take(MAX_TOKEN_FILE_SIZE + 1)
            .read_to_end(&mut data)
            .map_err(unreadable)?;
        if data.len() as u64 > MAX_TOKEN_FILE_SIZE {
            return Err(too_large(data.len() as u64));
        }

        if data.is_empty() {
            return Err(Error::FileEmpty { path: path.into() });
        }
        Ok(data)
    }
}
