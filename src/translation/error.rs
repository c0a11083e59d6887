use thiserror::Error;

/// Failure reported by a translation provider.
///
/// Callers do not distinguish transient from permanent failures: every
/// variant gets one retry and then a fallback value.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to reach translation service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation service responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response from translation service: {0}")]
    Parse(String),

    #[error("translation service returned no text")]
    Empty,

    #[error("invalid endpoint URL '{0}'")]
    Endpoint(String),
}
