//! File-per-key cache with read-time TTL.
//!
//! The same physical entry can be fresh for one caller and stale for another:
//! TTL is a parameter of the read, not a property of the record. That lets one
//! storage primitive serve a plugin's normal refresh and an hour-bucketed rate
//! limit counter alike. Entries are never proactively expired; staleness is
//! evaluated lazily on read.
//!
//! The value is opaque bytes in a plain file whose mtime is the write
//! timestamp. Writes go through a temp file in the same directory followed by
//! a rename, so a concurrent reader of the same key never observes a partial
//! value. Distinct keys never contend; there is no global lock.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Result;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Explicit cache configuration. Nothing is resolved from the ambient
/// environment at call sites.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub default_ttl: Duration,
}

pub struct Cache {
    dir: PathBuf,
    default_ttl: Duration,
}

impl Cache {
    pub fn new(config: CacheConfig) -> Self {
        Cache {
            dir: config.dir,
            default_ttl: config.default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys are caller-supplied and unnamespaced; path separators must not
    /// let a discriminator escape the cache directory.
    fn entry_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == '\0' { '-' } else { c })
            .collect();
        self.dir.join(safe)
    }

    /// Fresh value for `key`, or `None` if the entry is missing or its age
    /// has reached `ttl`. Reading never mutates the entry or its timestamp.
    pub fn get(&self, key: &str, ttl: Duration) -> Option<String> {
        let age = self.age(key)?;
        if age >= ttl {
            return None;
        }
        match fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(key, error = %err, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Unconditional overwrite with a fresh timestamp. Atomic with respect to
    /// concurrent readers of the same key.
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(self.entry_path(key)).map_err(|err| err.error)?;
        Ok(())
    }

    /// Remove the entry; subsequent reads miss until the next [Cache::set].
    /// Used when an external signal says the cached fact is obsolete before
    /// its TTL elapses.
    pub fn invalidate(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    /// Age of the entry since its last write, if it exists.
    pub fn age(&self, key: &str) -> Option<Duration> {
        let written = fs::metadata(self.entry_path(key)).ok()?.modified().ok()?;
        // An mtime in the future (clock step) counts as just written.
        Some(SystemTime::now().duration_since(written).unwrap_or(Duration::ZERO))
    }

    /// Cached value if fresh, otherwise `compute`. A non-empty computed value
    /// is stored before it is returned; an empty one is returned without
    /// being stored; an error propagates and nothing is cached, so a failed
    /// computation never poisons the entry.
    ///
    /// A failed store degrades to always-recompute rather than failing the
    /// call.
    pub fn get_or_compute<F>(&self, key: &str, ttl: Duration, compute: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(value) = self.get(key, ttl) {
            return Ok(value);
        }
        let value = compute()?;
        if !value.is_empty()
            && let Err(err) = self.set(key, &value)
        {
            warn!(key, error = %err, "cache write failed, value not stored");
        }
        Ok(value)
    }
}
