//! Content-addressed disk cache for remote token counts.
//!
//! Counting tokens with the Anthropic API costs a network round trip and counts
//! against rate limits, so the remote backend stores each answer on disk and
//! never asks twice for the same `(model, text)` pair.
//!
//! # Layout
//!
//! ```text
//! ~/.cache/tokviz/
//! ├── 3f5a...e1.json   # SHA-256 of the key, JSON-encoded value
//! └── 9b0c...42.json
//! ```
//!
//! Keys are arbitrary strings and are never stored; the file name is the hex
//! SHA-256 of the key. Entries never expire. The only way to remove them is
//! [`DiskCache::clear`] (`tokviz cache clear`).
//!
//! # Failure Handling
//!
//! Reads never fail. A missing entry is a [`CacheLookup::Miss`]; an entry that
//! cannot be read or decoded is [`CacheLookup::Corrupt`], which callers treat
//! as a miss. Writes go to a temporary file in the cache directory and are
//! renamed into place, so a reader never sees half an entry.
//!
//! # Concurrency
//!
//! A [`parking_lot::RwLock`] lets any number of lookups run together while
//! writes and clears are exclusive within the process. Separate processes can
//! race on the same entry; both write the same value.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<T> {
    /// Entry found and decoded
    Hit(T),
    /// No entry for the key
    Miss,
    /// Entry exists but could not be read or decoded
    Corrupt(String),
}

impl<T> CacheLookup<T> {
    /// The cached value, treating corrupt entries as misses.
    pub fn hit(self) -> Option<T> {
        match self {
            Self::Hit(value) => Some(value),
            Self::Miss | Self::Corrupt(_) => None,
        }
    }

    /// `true` for [`CacheLookup::Hit`].
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Disk cache rooted at one directory.
pub struct DiskCache {
    dir: PathBuf,
    lock: RwLock<()>,
}

impl DiskCache {
    /// Cache at the resolved default location.
    ///
    /// See [`crate::config::get_cache_dir`] for the resolution order.
    ///
    /// # Errors
    ///
    /// Returns an error if no cache directory can be determined.
    pub fn new(configured: Option<&Path>) -> Result<Self> {
        let dir = crate::config::get_cache_dir(configured)?;
        Ok(Self::with_dir(dir))
    }

    /// Cache rooted at `dir`. The directory is created on first write.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: RwLock::new(()),
        }
    }

    /// The cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.dir
    }

    /// Hex SHA-256 of a key.
    #[must_use]
    pub fn fingerprint(key: &str) -> String {
        hex::encode(Sha256::digest(key.as_bytes()))
    }

    /// File that holds (or would hold) the entry for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", Self::fingerprint(key)))
    }

    /// Look up `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> CacheLookup<T> {
        let path = self.path_for(key);
        let _guard = self.lock.read();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return CacheLookup::Miss,
            Err(e) => return CacheLookup::Corrupt(format!("{}: {e}", path.display())),
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => CacheLookup::Hit(value),
            Err(e) => CacheLookup::Corrupt(format!("{}: {e}", path.display())),
        }
    }

    /// Store `value` under `key`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or the entry cannot
    /// be written.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let data = serde_json::to_vec(value).context("Failed to serialize cache entry")?;
        let path = self.path_for(key);
        let _guard = self.lock.write();

        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create cache directory: {}", self.dir.display())
        })?;

        let mut temp = NamedTempFile::new_in(&self.dir).with_context(|| {
            format!("Failed to create temporary file in {}", self.dir.display())
        })?;
        temp.write_all(&data).context("Failed to write cache entry")?;
        temp.as_file().sync_all().context("Failed to flush cache entry")?;
        temp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to move cache entry into place: {}", path.display()))?;

        debug!("Cached entry at {}", path.display());
        Ok(())
    }

    /// Remove every entry.
    ///
    /// Clearing a cache that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock.write();
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {
                debug!("Cleared cache at {}", self.dir.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to clear cache at {}", self.dir.display())),
        }
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub fn entry_count(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    /// Total size of stored entries in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub fn size_bytes(&self) -> Result<u64> {
        let mut total = 0;
        for path in self.entries()? {
            total += fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
        }
        Ok(total)
    }

    fn entries(&self) -> Result<Vec<PathBuf>> {
        let _guard = self.lock.read();
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to list cache at {}", self.dir.display()));
            }
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                entries.push(path);
            }
        }
        Ok(entries)
    }
}
