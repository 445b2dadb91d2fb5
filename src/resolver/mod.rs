//! Turns user-supplied sharing links into fetchable document URLs.
//!
//! A link is classified into a [`Provider`] first and only then handed to the
//! provider's resolver. Provider hosts are checked before the generic `.pdf`
//! suffix, so a Google Drive URL ending in `.pdf` is still a Drive link.

pub mod errors;
pub mod google_drive;
pub mod onedrive;
pub mod types;

pub use errors::ResolveError;
pub use types::{Provider, ResolvedSource};

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

use crate::config::{Config, DEFAULT_PUBLISHER_DOMAINS};

const USER_AGENT: &str = "EocRating/0.1";
const DEFAULT_REDIRECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct LinkResolver {
    client: Client,
    publisher_domains: Vec<String>,
}

impl LinkResolver {
    pub fn new(redirect_timeout: Duration, publisher_domains: Vec<String>) -> reqwest::Result<Self> {
        Ok(Self::with_client(
            redirect_client(redirect_timeout)?,
            publisher_domains,
        ))
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(
            config.redirect_timeout(),
            config.publisher_domains().to_vec(),
        )
    }

    pub fn with_client(client: Client, publisher_domains: Vec<String>) -> Self {
        Self {
            client,
            publisher_domains,
        }
    }

    /// Which provider handles `url`, if any.
    pub fn classify(&self, url: &Url) -> Option<Provider> {
        classify(url, &self.publisher_domains)
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, raw_url: &str) -> Result<ResolvedSource, ResolveError> {
        let url = parse_link(raw_url)?;

        let provider = self
            .classify(&url)
            .ok_or_else(|| ResolveError::UnsupportedSource(raw_url.trim().to_string()))?;

        let canonical_url = match provider {
            Provider::GoogleDrive => google_drive::resolve(&url)?,
            Provider::OneDrive => onedrive::resolve(&self.client, &url).await?,
            Provider::DirectPdf => url,
        };

        info!(%provider, canonical_url = %canonical_url, "link resolved");
        Ok(ResolvedSource {
            canonical_url,
            provider,
        })
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        // Only fails when the TLS backend cannot load.
        let client = redirect_client(DEFAULT_REDIRECT_TIMEOUT).unwrap_or_default();
        Self::with_client(
            client,
            DEFAULT_PUBLISHER_DOMAINS.iter().map(|d| d.to_string()).collect(),
        )
    }
}

fn redirect_client(timeout: Duration) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
}

fn parse_link(raw_url: &str) -> Result<Url, ResolveError> {
    let trimmed = raw_url.trim();
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(url),
        _ => Err(ResolveError::UnsupportedSource(trimmed.to_string())),
    }
}

/// Provider precedence: Google Drive, OneDrive, then direct PDF / publisher.
pub fn classify(url: &Url, publisher_domains: &[String]) -> Option<Provider> {
    if google_drive::is_google_drive(url) {
        Some(Provider::GoogleDrive)
    } else if onedrive::is_onedrive(url) {
        Some(Provider::OneDrive)
    } else if is_pdf_link(url) || is_publisher(url, publisher_domains) {
        Some(Provider::DirectPdf)
    } else {
        None
    }
}

/// The path or the whole link, fragment aside, ends in `.pdf`.
fn is_pdf_link(url: &Url) -> bool {
    let mut link = url.clone();
    link.set_fragment(None);
    [url.path(), link.as_str()]
        .iter()
        .any(|s| s.to_ascii_lowercase().ends_with(".pdf"))
}

fn is_publisher(url: &Url, publisher_domains: &[String]) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    publisher_domains.iter().any(|domain| {
        host == domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
    })
}
