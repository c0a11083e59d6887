//! Configuration file management and resolution against CLI options.

mod manager;

pub use manager::{
    BatchConfig, CacheConfig, CacheLocation, ChatConfig, ConfigFile, ConfigManager, KotlConfig,
    DEFAULT_PROVIDER, ProviderConfig, ProviderKind, ResolveOptions, ResolvedConfig, ResolvedProvider,
    resolve_cache_location, resolve_config,
};
