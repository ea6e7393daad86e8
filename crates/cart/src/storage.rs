//! File-backed local key-value store.
//!
//! Stands in for the device's local storage API: string keys, string
//! values, one file per key under a data directory. Keys are sanitized to
//! filesystem-safe names, so the storage key can carry characters like
//! `@` and `:` without producing odd paths.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Distinguishes concurrent writers' temp files for the same key.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Local store read/write failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persistent local key-value store rooted at a data directory.
///
/// Cheap to clone; clones share the same backing directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store backed by the given directory.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The backing directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] on any I/O failure other than the
    /// key being absent.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// The value lands via a temp file + rename, so readers never observe
    /// a partially written entry. Each write gets its own temp file, so
    /// concurrent writers of the same key cannot consume each other's;
    /// whichever rename happens last wins.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] on any I/O failure.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::Write {
                path: self.root.clone(),
                source,
            })?;

        let tmp = path.with_extension(format!(
            "{}.tmp",
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|source| StorageError::Write {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StorageError::Write { path, source })?;

        Ok(())
    }

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Remove`] on any other I/O failure.
    pub async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove { path, source }),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_key(key))
    }
}

/// Map a storage key to a filesystem-safe file name.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
