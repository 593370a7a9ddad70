use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StorageError {
    /// The backing file exists but its contents cannot be decoded.
    Corrupt { path: PathBuf, reason: String },
    /// The backing file exists but could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// Writing or replacing the backing file failed.
    Write { path: PathBuf, source: std::io::Error },
    /// The in-memory collections could not be encoded.
    Encode(serde_json::Error),
}

impl StorageError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Corrupt { path, reason } => {
                write!(f, "Saved maps in {} are unreadable: {}", path.display(), reason)
            }
            StorageError::Read { path, source } => {
                write!(f, "Could not read {}: {}", path.display(), source)
            }
            StorageError::Write { path, source } => {
                write!(f, "Could not save maps to {}: {}", path.display(), source)
            }
            StorageError::Encode(e) => write!(f, "Could not encode maps: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Corrupt { .. } => None,
            StorageError::Read { source, .. } | StorageError::Write { source, .. } => Some(source),
            StorageError::Encode(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Encode(err)
    }
}
