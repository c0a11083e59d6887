use async_trait::async_trait;

use super::TranslateError;

/// Language code of the text being translated.
pub const SOURCE_LANGUAGE: &str = "ko";

/// Language code every translation is produced in.
pub const TARGET_LANGUAGE: &str = "en";

/// A remote translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Short provider name for logs and `/config` output.
    fn name(&self) -> &str;

    /// Translates `text` from `source` to `target`.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError>;
}
