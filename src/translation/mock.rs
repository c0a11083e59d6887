//! Scripted translator used by the test suites.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{TranslateError, Translator};

type CallHook = Box<dyn Fn(&str) + Send + Sync>;

/// Translator that answers from a fixed table.
///
/// Unknown text is answered as `EN(<text>)`. Failures can be scripted for
/// the first N calls or for every call.
pub struct MockTranslator {
    responses: HashMap<String, String>,
    remaining_failures: AtomicUsize,
    always_fail: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
    on_call: Option<CallHook>,
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            remaining_failures: AtomicUsize::new(0),
            always_fail: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            on_call: None,
        }
    }

    /// A translator whose every call fails.
    pub fn failing() -> Self {
        Self {
            always_fail: true,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_response(mut self, source: &str, translated: &str) -> Self {
        self.responses
            .insert(source.to_string(), translated.to_string());
        self
    }

    /// Makes the next `count` calls fail.
    #[must_use]
    pub fn failing_times(self, count: usize) -> Self {
        self.remaining_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Runs `hook` with the source text at the start of every call.
    #[must_use]
    pub fn with_on_call(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_call = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Source texts in the order they were requested.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn take_failure(&self) -> bool {
        self.remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(text.to_string());

        if let Some(hook) = &self.on_call {
            hook(text);
        }

        if self.always_fail || self.take_failure() {
            return Err(TranslateError::Parse("scripted failure".to_string()));
        }

        Ok(self
            .responses
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("EN({text})")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_failures_run_out() {
        let mock = MockTranslator::new().failing_times(2);

        assert!(mock.translate("가", "ko", "en").await.is_err());
        assert!(mock.translate("가", "ko", "en").await.is_err());
        assert_eq!(mock.translate("가", "ko", "en").await.unwrap(), "EN(가)");
        assert_eq!(mock.calls(), 3);
    }
}
