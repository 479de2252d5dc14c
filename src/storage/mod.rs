//! Durable client storage.
//!
//! The session token survives process restarts by living in a small key/value
//! file next to the configuration, addressed by a fixed key.

mod error;

pub use error::StorageError;

use log::*;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key under which the session token is persisted.
pub const TOKEN_KEY: &str = "sn-token";

const FILE_NAME: &str = "storage.yml";

/// String key/value storage that outlives a single process.
///
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage backed by a YAML file, rewritten on every mutation.
///
pub struct FileStorage {
    file_path: PathBuf,
}

impl FileStorage {
    /// Returns storage kept in the given directory.
    ///
    pub fn new(dir_path: &Path) -> FileStorage {
        FileStorage {
            file_path: dir_path.join(FILE_NAME),
        }
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents =
            fs::read_to_string(&self.file_path).map_err(|e| StorageError::ReadFailed {
                path: self.file_path.clone(),
                source: e,
            })?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_yaml::to_string(entries)?;
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }
        open_private(&self.file_path)
            .and_then(|mut file| file.write_all(content.as_bytes()))
            .map_err(|e| StorageError::WriteFailed {
                path: self.file_path.clone(),
                source: e,
            })
    }
}

/// Open the file for rewriting, readable by the owner only.
///
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!("Persisting '{}' to {}...", key, self.file_path.display());
        let mut entries = self.read()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        debug!("Removing '{}' from {}...", key, self.file_path.display());
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

/// Process-local storage.
///
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("todolist-client-storage-{}", Uuid::new_v4()))
    }

    #[test]
    fn memory_storage_set_get_remove() -> Result<(), StorageError> {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_KEY)?, None);
        storage.set(TOKEN_KEY, "abc")?;
        assert_eq!(storage.get(TOKEN_KEY)?, Some("abc".to_string()));
        storage.remove(TOKEN_KEY)?;
        assert_eq!(storage.get(TOKEN_KEY)?, None);
        Ok(())
    }

    #[test]
    fn file_storage_survives_new_instance() -> Result<(), StorageError> {
        let dir = temp_dir();
        FileStorage::new(&dir).set(TOKEN_KEY, "abc")?;

        let reopened = FileStorage::new(&dir);
        assert_eq!(reopened.get(TOKEN_KEY)?, Some("abc".to_string()));
        reopened.remove(TOKEN_KEY)?;
        assert_eq!(FileStorage::new(&dir).get(TOKEN_KEY)?, None);

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn file_storage_keeps_other_keys() -> Result<(), StorageError> {
        let dir = temp_dir();
        let storage = FileStorage::new(&dir);
        storage.set("theme", "dark")?;
        storage.set(TOKEN_KEY, "abc")?;
        storage.remove(TOKEN_KEY)?;
        assert_eq!(storage.get("theme")?, Some("dark".to_string()));

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_is_owner_only() -> Result<(), StorageError> {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(FILE_NAME);
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        FileStorage::new(&dir).set(TOKEN_KEY, "abc")?;
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(FileStorage::new(&dir).get(TOKEN_KEY)?, Some("abc".to_string()));

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn file_storage_missing_file_reads_empty() -> Result<(), StorageError> {
        let storage = FileStorage::new(&temp_dir());
        assert_eq!(storage.get(TOKEN_KEY)?, None);
        storage.remove(TOKEN_KEY)?;
        Ok(())
    }
}
