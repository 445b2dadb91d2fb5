use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("unsupported file source: {0}")]
    UnsupportedSource(String),

    #[error("malformed {provider} link: {reason}")]
    MalformedLink {
        provider: &'static str,
        reason: String,
    },

    #[error("unable to resolve link {url}: {reason}")]
    LinkResolution { url: String, reason: String },
}
