//! XDG-style path utilities for configuration and cache locations.
//!
//! XDG Base Directory variables win over the OS-specific defaults so the
//! layout is the same on every platform.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "kotl";

/// File name of the translation cache inside the cache directory.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Returns the configuration directory for kotl.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/kotl` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/kotl` otherwise
pub fn config_dir() -> Result<PathBuf> {
    xdg_or_home("XDG_CONFIG_HOME", ".config")
}

/// Returns the cache directory for kotl.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/kotl` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/kotl` otherwise
pub fn cache_dir() -> Result<PathBuf> {
    xdg_or_home("XDG_CACHE_HOME", ".cache")
}

/// Default location of the JSON translation cache.
pub fn default_cache_file() -> Result<PathBuf> {
    Ok(cache_dir()?.join(CACHE_FILE_NAME))
}

fn xdg_or_home(var: &str, fallback: &str) -> Result<PathBuf> {
    match std::env::var(var) {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => {
            let home = dirs::home_dir().context("Failed to determine home directory")?;
            Ok(home.join(fallback).join(APP_DIR))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_default() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        let dir = config_dir().unwrap();
        assert!(dir.ends_with(".config/kotl"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", "/custom/config") };

        let dir = config_dir().unwrap();
        assert_eq!(dir, PathBuf::from("/custom/config/kotl"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
        }
    }

    #[test]
    #[serial]
    fn test_default_cache_file_under_xdg_cache_home() {
        let original = std::env::var("XDG_CACHE_HOME").ok();
        unsafe { std::env::set_var("XDG_CACHE_HOME", "/custom/cache") };

        let file = default_cache_file().unwrap();
        assert_eq!(file, PathBuf::from("/custom/cache/kotl/cache.json"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CACHE_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_CACHE_HOME") };
        }
    }

    #[test]
    #[serial]
    fn test_empty_xdg_value_falls_back_to_home() {
        let original = std::env::var("XDG_CACHE_HOME").ok();
        unsafe { std::env::set_var("XDG_CACHE_HOME", "") };

        let dir = cache_dir().unwrap();
        assert!(dir.ends_with(".cache/kotl"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CACHE_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_CACHE_HOME") };
        }
    }
}
