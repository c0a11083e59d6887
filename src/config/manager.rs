use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use crate::batch::{DEFAULT_CHUNK_DELAY, DEFAULT_CHUNK_SIZE, PipelineOptions};
use crate::interactive::DEFAULT_DEBOUNCE;
use crate::paths;
use crate::translation::DEFAULT_GOOGLE_ENDPOINT;

/// Provider used when neither the CLI nor the config file names one.
pub const DEFAULT_PROVIDER: &str = "google";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default settings in the `[kotl]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KotlConfig {
    /// Default provider name.
    pub provider: Option<String>,
}

/// Which API a provider speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Translate web endpoint.
    #[default]
    Google,
    /// OpenAI-compatible chat completions.
    OpenAi,
}

impl ProviderKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAi => "openai",
        }
    }
}

/// Configuration for a translation provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    /// API base URL. Optional for `google`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Model name, required for `openai`.
    #[serde(default)]
    pub model: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// `[batch]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    pub chunk_size: Option<usize>,
    pub chunk_delay_ms: Option<u64>,
}

/// `[chat]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    pub debounce_ms: Option<u64>,
}

/// `[cache]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub path: Option<PathBuf>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/kotl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub kotl: KotlConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Where the translation cache lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLocation {
    File(PathBuf),
    /// Keep translations in memory only.
    Disabled,
}

/// Provider settings after defaults and API key lookup.
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    pub kind: ProviderKind,
    pub endpoint: String,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider_name: String,
    pub provider: ResolvedProvider,
    pub pipeline: PipelineOptions,
    pub debounce: Duration,
    pub cache: CacheLocation,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Cache file override.
    pub cache_path: Option<PathBuf>,
    /// Disable the on-disk cache.
    pub no_cache: bool,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.kotl.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let provider = resolve_provider(&provider_name, config_file)?;

    let chunk_size = config_file.batch.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
    if chunk_size == 0 {
        bail!(
            "Invalid configuration: 'batch.chunk_size' must be at least 1\n\n\
             Fix it in ~/.config/kotl/config.toml"
        );
    }

    let pipeline = PipelineOptions {
        chunk_size,
        chunk_delay: config_file
            .batch
            .chunk_delay_ms
            .map_or(DEFAULT_CHUNK_DELAY, Duration::from_millis),
    };

    let debounce = config_file
        .chat
        .debounce_ms
        .map_or(DEFAULT_DEBOUNCE, Duration::from_millis);

    let cache = resolve_cache_location(options, config_file)?;

    Ok(ResolvedConfig {
        provider_name,
        provider,
        pipeline,
        debounce,
        cache,
    })
}

/// Resolves only the cache location, for commands that never translate.
pub fn resolve_cache_location(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<CacheLocation> {
    if options.no_cache {
        return Ok(CacheLocation::Disabled);
    }

    match options.cache_path.as_ref().or(config_file.cache.path.as_ref()) {
        Some(path) => Ok(CacheLocation::File(path.clone())),
        None => Ok(CacheLocation::File(paths::default_cache_file()?)),
    }
}

fn resolve_provider(provider_name: &str, config_file: &ConfigFile) -> Result<ResolvedProvider> {
    let builtin_google = ProviderConfig::default();

    let provider_config = match config_file.providers.get(provider_name) {
        Some(config) => config,
        None if provider_name == DEFAULT_PROVIDER => &builtin_google,
        None => {
            let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
            if !available.contains(&DEFAULT_PROVIDER) {
                available.push(DEFAULT_PROVIDER);
            }
            available.sort_unstable();
            bail!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/kotl/config.toml",
                available.join("\n  - ")
            );
        }
    };

    let endpoint = match (provider_config.kind, &provider_config.endpoint) {
        (_, Some(endpoint)) => endpoint.clone(),
        (ProviderKind::Google, None) => DEFAULT_GOOGLE_ENDPOINT.to_string(),
        (ProviderKind::OpenAi, None) => bail!(
            "Provider '{provider_name}' is missing required setting 'endpoint'\n\n\
             Set it in ~/.config/kotl/config.toml:\n  \
             [providers.{provider_name}]\n  \
             endpoint = \"http://localhost:11434\""
        ),
    };

    if provider_config.kind == ProviderKind::OpenAi && provider_config.model.is_none() {
        bail!(
            "Provider '{provider_name}' is missing required setting 'model'\n\n\
             Set it in ~/.config/kotl/config.toml:\n  \
             [providers.{provider_name}]\n  \
             model = \"gemma3:12b\""
        );
    }

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/kotl/config.toml"
        );
    }

    Ok(ResolvedProvider {
        kind: provider_config.kind,
        endpoint,
        model: provider_config.model.clone(),
        api_key,
        timeout: Duration::from_secs(provider_config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is read from `$XDG_CONFIG_HOME/kotl/config.toml`
    /// or `~/.config/kotl/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file, or the defaults if there is none.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        match fs::metadata(&self.config_path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ConfigFile::default()),
            _ => self.load(),
        }
    }
}
