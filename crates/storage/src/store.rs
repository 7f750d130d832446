//! Object-store trait and backends.
//!
//! The pipeline treats the blob store as an external collaborator
//! behind the [`ObjectStore`] seam: bucket bootstrap plus put/get/list
//! by key. Keys use `/` separators regardless of backend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StorageError;

/// Key-value blob store holding one bucket of partition objects.
pub trait ObjectStore: Send + Sync {
    /// Returns true when the bucket already exists.
    ///
    /// # Errors
    /// Backend-specific failures.
    fn bucket_exists(&self) -> Result<bool, StorageError>;

    /// Creates the bucket. Idempotent.
    ///
    /// # Errors
    /// Backend-specific failures.
    fn create_bucket(&self) -> Result<(), StorageError>;

    /// Stores a blob under `key`, overwriting any prior object
    /// (last-write-wins).
    ///
    /// # Errors
    /// Backend-specific failures.
    fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Fetches the blob stored under `key`, or `None` when absent.
    ///
    /// # Errors
    /// Backend-specific failures other than a missing key.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Lists all keys starting with `prefix`, sorted ascending.
    /// An absent bucket lists as empty.
    ///
    /// # Errors
    /// Backend-specific failures.
    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// Filesystem-backed object store: one directory per bucket, one file
/// per object, keys mapped to relative paths.
#[derive(Debug)]
pub struct FsObjectStore {
    root: PathBuf,
    bucket: String,
}

impl FsObjectStore {
    /// Creates a store rooted at `root` for the given bucket.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
        }
    }

    fn bucket_dir(&self) -> PathBuf {
        self.root.join(&self.bucket)
    }

    fn object_path(&self, key: &str) -> PathBuf {
        let mut path = self.bucket_dir();
        for part in key.split('/') {
            path.push(part);
        }
        path
    }
}

impl ObjectStore for FsObjectStore {
    fn bucket_exists(&self) -> Result<bool, StorageError> {
        Ok(self.bucket_dir().is_dir())
    }

    fn create_bucket(&self) -> Result<(), StorageError> {
        std::fs::create_dir_all(self.bucket_dir())?;
        Ok(())
    }

    fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match std::fs::read(self.object_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let dir = self.bucket_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        collect_keys(&dir, "", &mut keys)?;
        keys.retain(|key| key.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }
}

fn collect_keys(dir: &Path, rel: &str, keys: &mut Vec<String>) -> Result<(), StorageError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let child_rel = if rel.is_empty() {
            name
        } else {
            format!("{rel}/{name}")
        };

        if entry.file_type()?.is_dir() {
            collect_keys(&entry.path(), &child_rel, keys)?;
        } else {
            keys.push(child_rel);
        }
    }
    Ok(())
}

/// In-memory object store for tests and fixtures.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    bucket_exists: bool,
    objects: BTreeMap<String, Vec<u8>>,
}

impl MemoryObjectStore {
    /// Creates an empty store without a bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Backend("memory store poisoned".to_string()))
    }
}

impl ObjectStore for MemoryObjectStore {
    fn bucket_exists(&self) -> Result<bool, StorageError> {
        Ok(self.lock()?.bucket_exists)
    }

    fn create_bucket(&self) -> Result<(), StorageError> {
        self.lock()?.bucket_exists = true;
        Ok(())
    }

    fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.lock()?.objects.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.lock()?.objects.get(key).cloned())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .lock()?
            .objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
