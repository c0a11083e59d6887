use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::CacheStore;
use crate::fs::atomic_write;

/// Cache persisted as a pretty-printed JSON object of source → translation.
///
/// Keys are kept sorted so the file diffs cleanly between saves.
#[derive(Debug)]
pub struct JsonCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonCache {
    /// Loads the cache at `path`. A missing file gives an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse cache file: {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read cache file: {}", path.display()));
            }
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded cache");
        Ok(Self { path, entries })
    }
}

impl CacheStore for JsonCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    fn save(&self) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize cache")?;
        atomic_write(&self.path, contents.as_bytes())?;
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "saved cache");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to delete cache file: {}", self.path.display())
                });
            }
        }
        self.entries.clear();
        Ok(())
    }

    fn has_persisted(&self) -> bool {
        self.path.exists()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cache(temp_dir: &TempDir) -> JsonCache {
        JsonCache::load(temp_dir.path().join("cache.json")).unwrap()
    }

    #[test]
    fn test_cache_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = create_test_cache(&temp_dir);

        assert!(cache.get("안녕하세요").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_hit() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = create_test_cache(&temp_dir);

        cache.put("안녕하세요".to_string(), "Hello".to_string());

        assert_eq!(cache.get("안녕하세요"), Some("Hello".to_string()));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = create_test_cache(&temp_dir);
        cache.put("안녕하세요".to_string(), "Hello".to_string());
        cache.put("감사합니다".to_string(), "Thank you".to_string());
        cache.save().unwrap();

        let reloaded = create_test_cache(&temp_dir);

        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("감사합니다"), Some("Thank you".to_string()));
    }

    #[test]
    fn test_saved_file_is_indented_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = create_test_cache(&temp_dir);
        cache.put("안녕하세요".to_string(), "Hello".to_string());
        cache.save().unwrap();

        let contents = fs::read_to_string(temp_dir.path().join("cache.json")).unwrap();

        assert_eq!(contents, "{\n  \"안녕하세요\": \"Hello\"\n}");
    }

    #[test]
    fn test_put_overwrites_existing_value() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = create_test_cache(&temp_dir);

        cache.put("물".to_string(), "water".to_string());
        cache.put("물".to_string(), "Water".to_string());

        assert_eq!(cache.get("물"), Some("Water".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = JsonCache::load(&path).unwrap_err();

        assert!(err.to_string().contains("Failed to parse cache file"));
    }

    #[test]
    fn test_clear_missing_file_still_empties_memory() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = create_test_cache(&temp_dir);
        cache.put("물".to_string(), "water".to_string());

        cache.clear().unwrap();

        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_failure_leaves_memory_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.json");
        let mut cache = JsonCache::load(&path).unwrap();
        cache.put("물".to_string(), "water".to_string());
        // A directory at the cache path cannot be removed with remove_file.
        fs::create_dir(&path).unwrap();

        let result = cache.clear();

        assert!(result.is_err());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("물"), Some("water".to_string()));
        assert!(cache.has_persisted());
    }
}
