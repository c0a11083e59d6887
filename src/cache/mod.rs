//! Translation cache keyed by source text.
//!
//! Only Korean→English lookups are ever stored, so the key is the source
//! text alone.

mod json;
mod memory;

pub use json::JsonCache;
pub use memory::MemoryCache;

use anyhow::Result;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// Storage contract shared by the file-backed and in-memory caches.
pub trait CacheStore {
    fn get(&self, key: &str) -> Option<String>;

    fn put(&mut self, key: String, value: String);

    /// Persists the whole map.
    fn save(&self) -> Result<()>;

    /// Deletes the persisted copy, then empties the map.
    ///
    /// If deletion fails the in-memory entries are left as they were.
    fn clear(&mut self) -> Result<()>;

    /// Returns `true` if a persisted copy exists that `clear` would delete.
    fn has_persisted(&self) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Location of the persisted copy, if any.
    fn path(&self) -> Option<&Path>;
}

/// Cache handle shared between the session loop and background jobs.
///
/// Never hold the lock across an `.await`.
pub type SharedCache = Arc<Mutex<dyn CacheStore + Send>>;

/// Wraps a cache store into a [`SharedCache`].
pub fn shared<C>(cache: C) -> SharedCache
where
    C: CacheStore + Send + 'static,
{
    Arc::new(Mutex::new(cache))
}

/// Result of a confirmed cache deletion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Nothing was persisted; memory left untouched.
    NotFound,
    /// The user declined the confirmation prompt.
    Declined,
    Cleared,
}

/// Clears `cache` after asking `confirm`.
///
/// The prompt is skipped when there is no persisted cache to delete.
pub fn clear_with_confirmation<F>(cache: &mut dyn CacheStore, confirm: F) -> Result<ClearOutcome>
where
    F: FnOnce() -> Result<bool>,
{
    if !cache.has_persisted() {
        return Ok(ClearOutcome::NotFound);
    }

    if !confirm()? {
        return Ok(ClearOutcome::Declined);
    }

    cache.clear()?;
    tracing::info!("translation cache cleared");
    Ok(ClearOutcome::Cleared)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clear_without_file_reports_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = JsonCache::load(temp_dir.path().join("cache.json")).unwrap();
        cache.put("안녕".to_string(), "Hi".to_string());

        let mut asked = false;
        let outcome = clear_with_confirmation(&mut cache, || {
            asked = true;
            Ok(true)
        })
        .unwrap();

        assert_eq!(outcome, ClearOutcome::NotFound);
        assert!(!asked);
        assert_eq!(cache.get("안녕"), Some("Hi".to_string()));
    }

    #[test]
    fn test_clear_declined_keeps_everything() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        let mut cache = JsonCache::load(&path).unwrap();
        cache.put("안녕".to_string(), "Hi".to_string());
        cache.save().unwrap();

        let outcome = clear_with_confirmation(&mut cache, || Ok(false)).unwrap();

        assert_eq!(outcome, ClearOutcome::Declined);
        assert!(path.exists());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_confirmed_removes_file_and_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        let mut cache = JsonCache::load(&path).unwrap();
        cache.put("안녕".to_string(), "Hi".to_string());
        cache.save().unwrap();

        let outcome = clear_with_confirmation(&mut cache, || Ok(true)).unwrap();

        assert_eq!(outcome, ClearOutcome::Cleared);
        assert!(!path.exists());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_deletion_error_propagates_and_keeps_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        let mut cache = JsonCache::load(&path).unwrap();
        cache.put("안녕".to_string(), "Hi".to_string());
        std::fs::create_dir(&path).unwrap();

        let err = clear_with_confirmation(&mut cache, || Ok(true)).unwrap_err();

        assert!(err.to_string().contains("Failed to delete cache file"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("안녕"), Some("Hi".to_string()));
    }

    #[test]
    fn test_confirm_error_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = JsonCache::load(temp_dir.path().join("cache.json")).unwrap();
        cache.save().unwrap();

        let result = clear_with_confirmation(&mut cache, || anyhow::bail!("prompt failed"));

        assert!(result.is_err());
        assert!(cache.has_persisted());
    }

    #[test]
    fn test_shared_cache_is_usable_across_threads() {
        let cache = shared(MemoryCache::default());
        let worker = Arc::clone(&cache);

        std::thread::spawn(move || {
            worker.lock().put("사과".to_string(), "apple".to_string());
        })
        .join()
        .unwrap();

        assert_eq!(cache.lock().get("사과"), Some("apple".to_string()));
    }
}
