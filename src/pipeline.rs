//! Sequential composition of the rating stages.
//!
//! Each stage runs to completion before the next starts and owns its output
//! until it is moved on. [`PipelineError`] is the only place failures are
//! mapped to protocol status codes.

use axum::http::StatusCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::extractor::{ExtractError, TextExtractor};
use crate::fetcher::{DocumentFetcher, FetchError};
use crate::normalizer::{GoogleTranslator, LanguageNormalizer, TranslateError, Translator};
use crate::resolver::{LinkResolver, Provider, ResolveError};
use crate::scoring::{RatingResult, ScoringEngine};
use crate::taxonomy::Taxonomy;

const INTERNAL_ERROR_DETAIL: &str = "Internal error while rating the document.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl PipelineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Resolve(_) | Self::Fetch(_) => StatusCode::BAD_REQUEST,
            Self::Extract(_) | Self::Translate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to callers.
    pub fn detail(&self) -> String {
        match self {
            Self::Resolve(ResolveError::UnsupportedSource(_)) => {
                "Unsupported file source.".to_string()
            }
            Self::Resolve(ResolveError::MalformedLink { provider, .. }) => {
                format!("Invalid {provider} URL.")
            }
            Self::Resolve(ResolveError::LinkResolution { .. }) => {
                "Unable to resolve OneDrive link.".to_string()
            }
            Self::Fetch(FetchError::InvalidDocument) => {
                "Downloaded file is not a valid PDF.".to_string()
            }
            Self::Fetch(FetchError::Http { status }) => {
                format!("Failed to download PDF (status {}).", status.as_u16())
            }
            Self::Fetch(FetchError::BodyTooLarge(_)) => "Document is too large.".to_string(),
            Self::Fetch(_) => "Failed to download PDF.".to_string(),
            Self::Translate(_) => "Translation failed.".to_string(),
            Self::Extract(_) => INTERNAL_ERROR_DETAIL.to_string(),
        }
    }
}

/// Everything a rated request reports back.
#[derive(Debug, Clone)]
pub struct RatingOutcome {
    pub provider: Provider,
    pub detected_language: String,
    pub was_translated: bool,
    pub result: RatingResult,
}

pub struct RatingPipeline {
    resolver: LinkResolver,
    fetcher: DocumentFetcher,
    extractor: TextExtractor,
    normalizer: LanguageNormalizer,
    engine: ScoringEngine,
}

impl RatingPipeline {
    pub fn new(
        resolver: LinkResolver,
        fetcher: DocumentFetcher,
        extractor: TextExtractor,
        normalizer: LanguageNormalizer,
        engine: ScoringEngine,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            extractor,
            normalizer,
            engine,
        }
    }

    /// Wire every stage from configuration, translating with `translator`.
    pub fn from_config(
        config: &Config,
        taxonomy: Arc<Taxonomy>,
        translator: Arc<dyn Translator>,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(
            LinkResolver::from_config(config)?,
            DocumentFetcher::from_config(config)?,
            TextExtractor::new(config.staging_dir().clone()),
            LanguageNormalizer::new(translator),
            ScoringEngine::new(taxonomy, config.max_rating())?,
        ))
    }

    /// [`RatingPipeline::from_config`] with the Google translator.
    pub fn with_google_translator(config: &Config, taxonomy: Arc<Taxonomy>) -> anyhow::Result<Self> {
        let translator = Arc::new(GoogleTranslator::from_config(config)?);
        Self::from_config(config, taxonomy, translator)
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    #[instrument(skip(self))]
    pub async fn rate(&self, raw_url: &str) -> Result<RatingOutcome, PipelineError> {
        let outcome = self.run(raw_url).await;
        match &outcome {
            Ok(outcome) => info!(
                rating = outcome.result.rating,
                matched = outcome.result.matched_measures.len(),
                language = %outcome.detected_language,
                "document rated"
            ),
            Err(err) if err.status_code().is_server_error() => {
                error!(error = %err, "rating failed")
            }
            Err(err) => info!(error = %err, "rating rejected"),
        }
        outcome
    }

    async fn run(&self, raw_url: &str) -> Result<RatingOutcome, PipelineError> {
        let source = self.resolver.resolve(raw_url).await?;
        let document = self.fetcher.fetch(&source).await?;
        let raw_text = self.extractor.extract(document.bytes).await?;
        let normalized = self.normalizer.normalize(&raw_text).await?;
        let result = self.engine.score(&normalized.text);

        Ok(RatingOutcome {
            provider: source.provider,
            detected_language: normalized.detected_language,
            was_translated: normalized.was_translated,
            result,
        })
    }
}
