//! Disk-backed value cache for expensive pipeline stages.
//!
//! [`FileCache`] memoizes any `serde` value under a caller-chosen key. Values
//! are opaque to the cache: it serializes them with `postcard`, writes one file
//! per key and hands them back unchanged on the next lookup. Entries older than
//! [`CacheConfig::lifetime`] are recomputed.
//!
//! Entry files live in [`CacheConfig::directory`] and are named
//! `<namespace digest>_<key digest>.bin`, both SHA-256 based, so several
//! namespaces can share one directory without colliding.
//!
//! # Example
//!
//! ```no_run
//! use ironseq::cache::{CacheConfig, FileCache};
//! use ironseq::SeqExt;
//!
//! # fn main() -> ironseq::Result<()> {
//! let cache = FileCache::new(CacheConfig {
//!     directory: "./ironseq_cache".into(),
//!     ..CacheConfig::default()
//! })?;
//!
//! // The second run reads the batches back from disk without touching the source.
//! let batches: Vec<Vec<u32>> = cache.memoize_vec("batches-of-4", (0..100).batch(4)?)?;
//! assert_eq!(batches.len(), 25);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::NamedTempFile;
use tracing::debug;

/// Where and for how long cached values are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory holding the entry files. Created on demand.
    pub directory: PathBuf,
    /// Maximum age of a usable entry. `None` keeps entries forever.
    pub lifetime: Option<Duration>,
    /// Prefix mixed into every key digest.
    pub namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./ironseq_cache"),
            lifetime: None,
            namespace: "default".to_string(),
        }
    }
}

/// A file-per-key value cache. See the [module docs](self).
#[derive(Clone, Debug)]
pub struct FileCache {
    config: CacheConfig,
    prefix: String,
}

fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data).iter().map(|b| format!("{b:02x}")).collect()
}

impl FileCache {
    /// Open a cache, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the directory cannot be created.
    pub fn new(config: CacheConfig) -> Result<Self> {
        fs::create_dir_all(&config.directory)
            .with_context(|| format!("failed to create cache directory {}", config.directory.display()))
            .map_err(Error::Cache)?;
        let prefix = sha256_hex(config.namespace.as_bytes())[..16].to_string();
        Ok(Self { config, prefix })
    }

    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// File that stores the entry for `key`.
    #[must_use]
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let digest = sha256_hex(format!("{}:{key}", self.config.namespace).as_bytes());
        self.config.directory.join(format!("{}_{digest}.bin", self.prefix))
    }

    fn is_fresh(&self, path: &Path) -> anyhow::Result<bool> {
        let modified = fs::metadata(path)?.modified()?;
        Ok(self.config.lifetime.is_none_or(|lifetime| {
            // A timestamp in the future counts as brand new.
            SystemTime::now()
                .duration_since(modified)
                .map_or(true, |age| age < lifetime)
        }))
    }

    fn read_entry<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let path = self.entry_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "cache miss");
                return Ok(None);
            }
            Err(e) => return Err(e).with_context(|| format!("failed to read cache entry {}", path.display())),
        };
        if !self.is_fresh(&path)? {
            debug!(key, "cache entry expired");
            return Ok(None);
        }
        let value = postcard::from_bytes(&bytes)
            .with_context(|| format!("failed to decode cache entry {}", path.display()))?;
        debug!(key, "cache hit");
        Ok(Some(value))
    }

    fn write_entry<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let path = self.entry_path(key);
        let encoded = postcard::to_allocvec(value).context("failed to encode cache entry")?;
        // Each writer stages under its own name; a failed write removes its file.
        let mut staging = NamedTempFile::new_in(&self.config.directory)
            .with_context(|| format!("failed to stage cache entry in {}", self.config.directory.display()))?;
        staging.write_all(&encoded).context("failed to write cache entry")?;
        staging.as_file().sync_all().context("failed to sync cache entry")?;
        staging
            .persist(&path)
            .with_context(|| format!("failed to publish cache entry {}", path.display()))?;
        debug!(key, bytes = encoded.len(), "cache entry stored");
        Ok(())
    }

    /// Fresh value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if an existing entry cannot be read or decoded
    /// as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.read_entry(key).map_err(Error::Cache)
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the entry cannot be encoded or written.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.write_entry(key, value).map_err(Error::Cache)
    }

    /// Return the fresh value under `key`, or run `compute`, store its result
    /// and return it. `compute` is not called on a hit.
    ///
    /// An entry that no longer decodes as `T` is treated as a miss and
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the entry cannot be read or written.
    pub fn get_or_compute<T, F>(&self, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.try_get_or_compute(key, || Ok::<T, std::convert::Infallible>(compute()))
    }

    /// [`get_or_compute`](Self::get_or_compute) for a computation that can fail.
    /// A failed computation stores nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Callback`] if `compute` fails, otherwise as
    /// [`get_or_compute`](Self::get_or_compute).
    pub fn try_get_or_compute<T, F, E>(&self, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> std::result::Result<T, E>,
        E: Into<anyhow::Error>,
    {
        match self.read_entry(key) {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) if e.downcast_ref::<postcard::Error>().is_some() => {
                debug!(key, error = %e, "discarding undecodable cache entry");
            }
            Err(e) => return Err(Error::Cache(e)),
        }
        let value = compute().map_err(Error::callback)?;
        self.put(key, &value)?;
        Ok(value)
    }

    /// Collect `items` into a `Vec` and cache it under `key`. On a hit the
    /// cached output is returned and `items` is dropped without being pulled.
    ///
    /// # Errors
    ///
    /// As [`get_or_compute`](Self::get_or_compute).
    pub fn memoize_vec<I>(&self, key: &str, items: I) -> Result<Vec<I::Item>>
    where
        I: IntoIterator,
        I::Item: Serialize + DeserializeOwned,
    {
        self.get_or_compute(key, || items.into_iter().collect())
    }

    /// Remove the entry for `key`. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if an existing entry cannot be removed.
    pub fn invalidate(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "cache entry invalidated");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Cache(
                anyhow::Error::new(e).context(format!("failed to remove cache entry {}", path.display())),
            )),
        }
    }

    /// Remove every entry of this cache's namespace. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`] if the directory cannot be listed or an entry
    /// cannot be removed.
    pub fn clear(&self) -> Result<usize> {
        self.clear_entries().map_err(Error::Cache)
    }

    fn clear_entries(&self) -> anyhow::Result<usize> {
        let prefix = format!("{}_", self.prefix);
        let mut removed = 0;
        for entry in fs::read_dir(&self.config.directory).context("failed to list cache directory")? {
            let entry = entry.context("failed to list cache directory")?;
            let owned = entry.file_name().to_str().is_some_and(|name| {
                name.starts_with(&prefix)
                    && Path::new(name)
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("bin"))
            });
            if owned {
                fs::remove_file(entry.path())
                    .with_context(|| format!("failed to remove cache entry {}", entry.path().display()))?;
                removed += 1;
            }
        }
        debug!(removed, namespace = %self.config.namespace, "cache cleared");
        Ok(removed)
    }
}
