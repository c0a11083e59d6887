//! Wiring from resolved configuration to the translation stack.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::batch::BatchPipeline;
use crate::cache::{JsonCache, MemoryCache, SharedCache, shared};
use crate::config::{
    CacheLocation, ConfigManager, ProviderKind, ResolveOptions, ResolvedConfig, ResolvedProvider,
    resolve_config,
};
use crate::interactive::InteractiveTranslator;
use crate::translation::{GoogleTranslator, OpenAiTranslator, Resolver, Translator};

/// Everything a command needs to translate.
pub struct AppContext {
    pub config: ResolvedConfig,
    pub resolver: Resolver,
}

impl AppContext {
    /// Loads config.toml, applies CLI overrides and opens the cache.
    pub fn load(options: &ResolveOptions) -> Result<Self> {
        let manager = ConfigManager::new()?;
        let file_config = manager.load_or_default()?;
        Self::from_config(resolve_config(options, &file_config)?)
    }

    pub fn from_config(config: ResolvedConfig) -> Result<Self> {
        let translator = build_translator(&config.provider)?;
        let cache = open_cache(&config.cache)?;

        tracing::debug!(
            provider = %config.provider_name,
            cache = ?config.cache,
            "translation context ready"
        );

        Ok(Self {
            resolver: Resolver::new(translator, cache),
            config,
        })
    }

    pub fn pipeline(&self) -> BatchPipeline {
        BatchPipeline::new(self.resolver.clone(), self.config.pipeline)
    }

    pub fn interactive(&self) -> InteractiveTranslator {
        InteractiveTranslator::new(self.resolver.clone())
    }
}

pub fn build_translator(provider: &ResolvedProvider) -> Result<Arc<dyn Translator>> {
    let translator: Arc<dyn Translator> = match provider.kind {
        ProviderKind::Google => Arc::new(GoogleTranslator::new(
            provider.endpoint.clone(),
            provider.timeout,
        )?),
        ProviderKind::OpenAi => {
            let model = provider
                .model
                .clone()
                .context("OpenAI-compatible provider requires a model")?;
            Arc::new(OpenAiTranslator::new(
                provider.endpoint.clone(),
                model,
                provider.api_key.clone(),
                provider.timeout,
            )?)
        }
    };

    Ok(translator)
}

/// Opens the cache at `location`. A missing file starts an empty cache.
pub fn open_cache(location: &CacheLocation) -> Result<SharedCache> {
    match location {
        CacheLocation::File(path) => Ok(shared(JsonCache::load(path)?)),
        CacheLocation::Disabled => Ok(shared(MemoryCache::default())),
    }
}
