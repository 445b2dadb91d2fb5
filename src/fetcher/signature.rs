use bytes::Bytes;
use url::Url;

use crate::fetcher::{errors::FetchError, types::FetchedDocument};

pub const PDF_SIGNATURE: &[u8] = b"%PDF";

pub fn has_pdf_signature(body: &[u8]) -> bool {
    body.starts_with(PDF_SIGNATURE)
}

/// Accept the body only if it starts with the PDF file signature.
pub fn validate_document(url_final: Url, body: Bytes) -> Result<FetchedDocument, FetchError> {
    if !has_pdf_signature(&body) {
        return Err(FetchError::InvalidDocument);
    }

    Ok(FetchedDocument {
        url_final,
        bytes: body,
        content_signature_valid: true,
    })
}
