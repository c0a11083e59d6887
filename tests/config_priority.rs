#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file settings
//! 3. Built-in defaults

use kotl::config::{
    BatchConfig, CacheConfig, CacheLocation, ChatConfig, ConfigFile, KotlConfig, ProviderConfig,
    ProviderKind, ResolveOptions, resolve_cache_location, resolve_config,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn make_config_with_defaults() -> ConfigFile {
    let mut providers = HashMap::new();
    providers.insert(
        "test_provider".to_string(),
        ProviderConfig {
            kind: ProviderKind::OpenAi,
            endpoint: Some("http://test.local".to_string()),
            model: Some("test_model".to_string()),
            api_key: Some("test_key".to_string()),
            api_key_env: None,
            timeout_secs: Some(5),
        },
    );

    ConfigFile {
        kotl: KotlConfig {
            provider: Some("test_provider".to_string()),
        },
        providers,
        batch: BatchConfig {
            chunk_size: Some(10),
            chunk_delay_ms: Some(0),
        },
        chat: ChatConfig {
            debounce_ms: Some(500),
        },
        cache: CacheConfig {
            path: Some(PathBuf::from("/config/cache.json")),
        },
    }
}

#[test]
fn test_config_file_values_used_without_cli() {
    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.provider_name, "test_provider");
    assert_eq!(resolved.provider.kind, ProviderKind::OpenAi);
    assert_eq!(resolved.provider.api_key, Some("test_key".to_string()));
    assert_eq!(resolved.provider.timeout, Duration::from_secs(5));
    assert_eq!(resolved.pipeline.chunk_size, 10);
    assert_eq!(resolved.pipeline.chunk_delay, Duration::ZERO);
    assert_eq!(resolved.debounce, Duration::from_millis(500));
    assert_eq!(
        resolved.cache,
        CacheLocation::File(PathBuf::from("/config/cache.json"))
    );
}

#[test]
fn test_cli_provider_overrides_config_provider() {
    let options = ResolveOptions {
        provider: Some("google".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.provider_name, "google");
    assert_eq!(resolved.provider.kind, ProviderKind::Google);
    assert!(resolved.provider.api_key.is_none());
}

#[test]
fn test_cli_cache_overrides_config_cache() {
    let options = ResolveOptions {
        cache_path: Some(PathBuf::from("/cli/cache.json")),
        ..ResolveOptions::default()
    };

    let location = resolve_cache_location(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(location, CacheLocation::File(PathBuf::from("/cli/cache.json")));
}

#[test]
fn test_no_cache_beats_every_path() {
    let options = ResolveOptions {
        cache_path: Some(PathBuf::from("/cli/cache.json")),
        no_cache: true,
        ..ResolveOptions::default()
    };

    let location = resolve_cache_location(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(location, CacheLocation::Disabled);
}

#[test]
fn test_builtin_defaults_without_config() {
    let options = ResolveOptions {
        cache_path: Some(PathBuf::from("/cli/cache.json")),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &ConfigFile::default()).unwrap();

    assert_eq!(resolved.provider_name, "google");
    assert_eq!(resolved.pipeline.chunk_size, 5);
    assert_eq!(resolved.pipeline.chunk_delay, Duration::from_millis(300));
    assert_eq!(resolved.debounce, Duration::from_millis(300));
    assert_eq!(resolved.provider.timeout, Duration::from_secs(30));
}

#[test]
fn test_configured_google_endpoint_overrides_builtin() {
    let mut config = ConfigFile::default();
    config.providers.insert(
        "google".to_string(),
        ProviderConfig {
            endpoint: Some("http://mirror.local".to_string()),
            ..ProviderConfig::default()
        },
    );

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.provider.endpoint, "http://mirror.local");
}
