use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::retry::{RetryError, RetryPolicy};

/// Upper bound on characters sent per translation request.
pub const MAX_CHUNK_CHARS: usize = 4500;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("translation request timed out")]
    Timeout,

    #[error("translation request failed: {0}")]
    Transport(String),

    #[error("translation service returned {status}")]
    Http { status: reqwest::StatusCode },

    #[error("unexpected translation response: {0}")]
    Malformed(String),

    #[error("translation gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<TranslateError>,
    },
}

impl TranslateError {
    pub fn should_retry(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport(_))
    }

    fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Machine translation capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError>;
}

/// Client for the public Google Translate `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: Url,
    retry: RetryPolicy,
}

impl GoogleTranslator {
    pub fn new(endpoint: Url, timeout: Duration, retry: RetryPolicy) -> reqwest::Result<Self> {
        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            retry,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let endpoint = Url::parse(config.translate_endpoint())?;
        let retry = RetryPolicy::new(config.fetch_max_retries(), config.retry_base_delay());
        Ok(Self::new(endpoint, config.translate_timeout(), retry)?)
    }

    async fn translate_chunk(
        &self,
        chunk: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
            .form(&[("q", chunk)])
            .send()
            .await
            .map_err(TranslateError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Http { status });
        }

        let body: Value = response
            .json()
            .await
            .map_err(TranslateError::from_reqwest_error)?;
        parse_response(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        let mut translated = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            let part = self
                .retry
                .run(
                    "translate_chunk",
                    || self.translate_chunk(chunk, source, target),
                    TranslateError::should_retry,
                )
                .await
                .map_err(|err| match err {
                    RetryError::Fatal(err) => err,
                    RetryError::Exhausted { attempts, last } => TranslateError::RetriesExhausted {
                        attempts,
                        last: Box::new(last),
                    },
                })?;
            debug!(chunk = index, "translated chunk");
            translated.push(part);
        }

        Ok(translated.join(" "))
    }
}

/// Concatenate the translated segments of a `[[["text", "orig", ...], ...], ...]`
/// response.
fn parse_response(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Malformed("missing segment list".to_string()))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            out.push_str(text);
        }
    }
    Ok(out)
}

/// Split `text` on whitespace into chunks of at most `max_chars` characters.
/// A single word longer than the limit is split mid-word.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { word_len + 1 };
        if current_len + needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
