use std::sync::Arc;

use super::{SOURCE_LANGUAGE, TARGET_LANGUAGE, TranslateError, Translator};
use crate::cache::SharedCache;

/// How a piece of source text was resolved.
#[derive(Debug)]
pub enum Resolution {
    /// Served from the cache; no request was made.
    CacheHit(String),
    /// Fetched from the provider and stored in the cache.
    Translated(String),
    /// The provider failed twice; the caller substitutes its fallback value.
    Fallback { error: TranslateError },
}

impl Resolution {
    /// The resolved text, or `None` for a fallback.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::CacheHit(text) | Self::Translated(text) => Some(text),
            Self::Fallback { .. } => None,
        }
    }

    /// The resolved text, or `fallback` if translation failed.
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.text().unwrap_or(fallback)
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Cache-then-provider lookup with a single retry.
#[derive(Clone)]
pub struct Resolver {
    translator: Arc<dyn Translator>,
    cache: SharedCache,
}

impl Resolver {
    pub fn new(translator: Arc<dyn Translator>, cache: SharedCache) -> Self {
        Self { translator, cache }
    }

    pub const fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn provider_name(&self) -> &str {
        self.translator.name()
    }

    /// Cache lookup only.
    pub fn cached(&self, text: &str) -> Option<String> {
        self.cache.lock().get(text)
    }

    /// Asks the provider, retrying exactly once on failure.
    ///
    /// Does not touch the cache.
    pub async fn fetch(&self, text: &str) -> Result<String, TranslateError> {
        match self.attempt(text).await {
            Ok(translated) => Ok(translated),
            Err(first) => {
                tracing::warn!(
                    provider = self.provider_name(),
                    error = %first,
                    "translation failed, retrying once"
                );
                self.attempt(text).await
            }
        }
    }

    /// Resolves `text` through the cache, falling back to the provider.
    ///
    /// New translations are stored in the cache but not saved to disk.
    pub async fn resolve(&self, text: &str) -> Resolution {
        if let Some(hit) = self.cached(text) {
            return Resolution::CacheHit(hit);
        }

        match self.fetch(text).await {
            Ok(translated) => {
                self.cache.lock().put(text.to_string(), translated.clone());
                Resolution::Translated(translated)
            }
            Err(error) => {
                tracing::warn!(error = %error, "retry failed, using fallback");
                Resolution::Fallback { error }
            }
        }
    }

    async fn attempt(&self, text: &str) -> Result<String, TranslateError> {
        let translated = self
            .translator
            .translate(text, SOURCE_LANGUAGE, TARGET_LANGUAGE)
            .await?;

        let trimmed = translated.trim();
        if trimmed.is_empty() {
            Err(TranslateError::Empty)
        } else {
            Ok(trimmed.to_string())
        }
    }
}
