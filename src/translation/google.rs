use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

use super::{TranslateError, Translator};

pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com";

/// Client for the public Google Translate web endpoint (`client=gtx`).
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint })
    }

    fn request_url(&self, text: &str, source: &str, target: &str) -> Result<Url, TranslateError> {
        let base = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));

        Url::parse_with_params(
            &base,
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|_| TranslateError::Endpoint(self.endpoint.clone()))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let url = self.request_url(text, source, target)?;

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Status { status, body });
        }

        let body: Value = response.json().await?;
        extract_translation(&body)
    }
}

/// Joins the translated segments of a `translate_a/single` response.
///
/// The payload looks like `[[["Hello", "안녕하세요", ...], ...], null, "ko", ...]`.
fn extract_translation(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Parse("missing segment list".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        Err(TranslateError::Empty)
    } else {
        Ok(text)
    }
}
