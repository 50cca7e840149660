//! Flat-file cache for job searches, keyed by normalized search parameters.
//!
//! The whole cache is one pretty-printed JSON object on disk. Writes go
//! through a temp file in the same directory and an atomic rename, so a
//! crashed write never leaves a truncated cache behind. An unreadable or
//! corrupt cache file is treated as empty.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::jobs::search::JobSearchResult;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cache write could not be committed: {0}")]
    Persist(#[from] tempfile::PersistError),
}

type CacheMap = BTreeMap<String, JobSearchResult>;

/// `lower(trim(skills)) + "|" + lower(trim(location))`
pub fn cache_key(skills: &str, location: &str) -> String {
    format!(
        "{}|{}",
        skills.trim().to_lowercase(),
        location.trim().to_lowercase()
    )
}

pub struct JobCache {
    path: PathBuf,
    ttl: Duration,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JobCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached result for `key` if it is younger than the TTL,
    /// marked `from_cache` with its age in whole minutes.
    pub fn lookup(&self, key: &str, now: DateTime<Utc>) -> Option<JobSearchResult> {
        let mut entry = self.load().remove(key)?;
        let age = now - entry.timestamp;

        if age >= self.ttl {
            debug!("Cache entry '{key}' expired ({} minutes old)", age.num_minutes());
            return None;
        }

        entry.from_cache = true;
        entry.cache_age_minutes = Some(age.num_minutes().max(0));
        Some(entry)
    }

    /// Inserts or replaces `key` and rewrites the cache file atomically.
    pub fn store(&self, key: &str, result: &JobSearchResult) -> Result<(), CacheError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut map = self.load();
        let mut stored = result.clone();
        stored.from_cache = false;
        stored.cache_age_minutes = None;
        map.insert(key.to_string(), stored);

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, &map)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path)?;

        debug!("Stored '{key}' in job cache at {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> CacheMap {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CacheMap::new(),
            Err(e) => {
                warn!("Job cache unreadable at {}: {e}", self.path.display());
                return CacheMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Job cache corrupt at {}, ignoring: {e}", self.path.display());
            CacheMap::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn result_at(timestamp: DateTime<Utc>) -> JobSearchResult {
        JobSearchResult {
            success: true,
            jobs: vec![],
            total_found: 0,
            search_term: "rust".to_string(),
            location: "Remote".to_string(),
            timestamp,
            from_cache: false,
            cache_age_minutes: None,
            is_demo: false,
            demo_reason: None,
            demo_warning: None,
            how_to_fix: None,
        }
    }

    #[test]
    fn test_cache_key_normalizes() {
        assert_eq!(cache_key("  Rust, Go ", " Remote "), "rust, go|remote");
    }

    #[test]
    fn test_store_then_lookup_within_ttl() {
        let dir = TempDir::new().unwrap();
        let cache = JobCache::new(
            dir.path().join("nested/job_cache.json"),
            Duration::minutes(60),
        );
        let now = Utc::now();

        cache.store("rust|remote", &result_at(now - Duration::minutes(5))).unwrap();
        let hit = cache.lookup("rust|remote", now).unwrap();

        assert!(hit.from_cache);
        assert_eq!(hit.cache_age_minutes, Some(5));
        assert_eq!(hit.search_term, "rust");
    }

    #[test]
    fn test_lookup_expired_entry_misses() {
        let dir = TempDir::new().unwrap();
        let cache = JobCache::new(dir.path().join("job_cache.json"), Duration::minutes(60));
        let now = Utc::now();

        cache.store("k", &result_at(now - Duration::minutes(61))).unwrap();
        assert!(cache.lookup("k", now).is_none());
    }

    #[test]
    fn test_lookup_missing_file_misses() {
        let dir = TempDir::new().unwrap();
        let cache = JobCache::new(dir.path().join("absent.json"), Duration::minutes(60));
        assert!(cache.lookup("k", Utc::now()).is_none());
    }

    #[test]
    fn test_corrupt_file_is_treated_as_empty_and_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job_cache.json");
        std::fs::write(&path, "{ not json").unwrap();

        let cache = JobCache::new(&path, Duration::minutes(60));
        assert!(cache.lookup("k", Utc::now()).is_none());

        cache.store("k", &result_at(Utc::now())).unwrap();
        assert!(cache.lookup("k", Utc::now()).is_some());
    }

    #[test]
    fn test_zero_ttl_always_misses() {
        let dir = TempDir::new().unwrap();
        let cache = JobCache::new(dir.path().join("job_cache.json"), Duration::zero());
        let now = Utc::now();

        cache.store("k", &result_at(now)).unwrap();
        assert!(cache.lookup("k", now).is_none());
    }

    #[test]
    fn test_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let cache = JobCache::new(dir.path().join("job_cache.json"), Duration::minutes(60));
        let now = Utc::now();

        cache.store("a", &result_at(now)).unwrap();
        cache.store("b", &result_at(now)).unwrap();

        assert!(cache.lookup("a", now).is_some());
        assert!(cache.lookup("b", now).is_some());
    }

    #[test]
    fn test_stored_entry_is_not_marked_from_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job_cache.json");
        let cache = JobCache::new(&path, Duration::minutes(60));

        let mut result = result_at(Utc::now());
        result.from_cache = true;
        result.cache_age_minutes = Some(12);
        cache.store("k", &result).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["k"]["from_cache"], false);
    }
}
