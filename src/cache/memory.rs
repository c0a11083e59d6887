use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

use super::CacheStore;

/// Ephemeral cache used when persistence is disabled (`--no-cache`).
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    fn save(&self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn has_persisted(&self) -> bool {
        false
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn path(&self) -> Option<&Path> {
        None
    }
}
