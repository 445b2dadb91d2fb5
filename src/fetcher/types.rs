use bytes::Bytes;
use url::Url;

/// Raw document bytes that passed signature validation.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub url_final: Url,
    pub bytes: Bytes,
    pub content_signature_valid: bool,
}
