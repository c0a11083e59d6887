use crate::translation::{Resolution, Resolver, contains_hangul};

/// Shown in place of a translation when the provider failed twice.
pub const UNAVAILABLE_MESSAGE: &str = "Translation not available. Check your connection.";

/// What the translation pane should do after a lookup.
#[derive(Debug)]
pub enum DisplayUpdate {
    /// Empty the translation pane.
    Clear,
    /// Leave the translation pane as it is.
    Unchanged,
    Show(Resolution),
}

impl DisplayUpdate {
    /// Text the pane should hold, or `None` to keep its contents.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::Clear => Some(""),
            Self::Unchanged => None,
            Self::Show(resolution) => Some(resolution.text_or(UNAVAILABLE_MESSAGE)),
        }
    }
}

/// Resolves selections and whole buffers for the interactive session.
///
/// The cache is saved after every lookup that produced a new translation.
#[derive(Clone)]
pub struct InteractiveTranslator {
    resolver: Resolver,
}

impl InteractiveTranslator {
    pub const fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// Translates an explicit selection. No selection clears the pane.
    pub async fn translate_selection(&self, selection: Option<&str>) -> DisplayUpdate {
        match selection.map(str::trim) {
            Some(text) if !text.is_empty() => self.lookup(text).await,
            _ => DisplayUpdate::Clear,
        }
    }

    /// Translates the whole buffer.
    ///
    /// An empty buffer clears the pane; text without Hangul leaves it as is.
    pub async fn translate_buffer(&self, buffer: &str) -> DisplayUpdate {
        let text = buffer.trim();

        if text.is_empty() {
            return DisplayUpdate::Clear;
        }
        if !contains_hangul(text) {
            return DisplayUpdate::Unchanged;
        }

        self.lookup(text).await
    }

    async fn lookup(&self, text: &str) -> DisplayUpdate {
        let resolution = self.resolver.resolve(text).await;

        if matches!(resolution, Resolution::Translated(_))
            && let Err(e) = self.resolver.cache().lock().save()
        {
            tracing::warn!(error = %format!("{e:#}"), "failed to save cache");
        }

        DisplayUpdate::Show(resolution)
    }
}
