//! Client storage error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing persisted client values.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to read the storage file
    #[error("Failed to read storage from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the storage file
    #[error("Failed to write storage to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Storage file contents could not be (de)serialized
    #[error("Malformed storage file: {0}")]
    Malformed(#[from] serde_yaml::Error),

    /// In-memory storage lock was poisoned
    #[error("Storage lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let error = StorageError::WriteFailed {
            path: PathBuf::from("/test/storage.yml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("/test/storage.yml"));
        assert!(error_str.contains("denied"));

        let error = StorageError::Poisoned;
        assert!(error.to_string().contains("poisoned"));
    }
}
