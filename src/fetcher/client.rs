use bytes::Bytes;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

use crate::config::Config;
use crate::fetcher::{errors::FetchError, signature::validate_document, types::FetchedDocument};
use crate::resolver::ResolvedSource;
use crate::retry::{RetryError, RetryPolicy};

const USER_AGENT: &str = "EocRating/0.1";
const DEFAULT_MAX_BODY_SIZE: u64 = 50 * 1024 * 1024; // 50MB

#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: Client,
    retry: RetryPolicy,
    max_body_size: u64,
}

impl DocumentFetcher {
    pub fn new(timeout: Duration, retry: RetryPolicy, max_body_size: u64) -> reqwest::Result<Self> {
        let client = ClientBuilder::new()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/pdf,*/*;q=0.8"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            retry,
            max_body_size,
        })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(
            config.fetch_timeout(),
            RetryPolicy::new(config.fetch_max_retries(), config.retry_base_delay()),
            config.max_document_bytes(),
        )
    }

    /// Default timeout and retry budget with no delay between attempts.
    pub fn with_defaults() -> reqwest::Result<Self> {
        Self::new(
            Duration::from_secs(15),
            RetryPolicy::new(3, Duration::ZERO),
            DEFAULT_MAX_BODY_SIZE,
        )
    }

    #[instrument(skip_all, fields(url = %source.canonical_url, provider = %source.provider))]
    pub async fn fetch(&self, source: &ResolvedSource) -> Result<FetchedDocument, FetchError> {
        self.fetch_url(&source.canonical_url).await
    }

    /// GET `url`, retrying transport failures; non-2xx and invalid content
    /// fail on the first attempt.
    pub async fn fetch_url(&self, url: &Url) -> Result<FetchedDocument, FetchError> {
        let (url_final, body) = self
            .retry
            .run("fetch_document", || self.get_once(url), FetchError::should_retry)
            .await
            .map_err(|err| match err {
                RetryError::Fatal(err) => err,
                RetryError::Exhausted { attempts, last } => FetchError::RetriesExhausted {
                    attempts,
                    last: Box::new(last),
                },
            })?;

        let document = validate_document(url_final, body)?;
        info!(bytes = document.bytes.len(), "document fetched");
        Ok(document)
    }

    async fn get_once(&self, url: &Url) -> Result<(Url, Bytes), FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > self.max_body_size
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let body = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check body size after download (in case Content-Length was missing)
        if body.len() as u64 > self.max_body_size {
            return Err(FetchError::BodyTooLarge(body.len() as u64));
        }

        Ok((final_url, body))
    }
}
