use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RatingRequest {
    /// PDF link from Google Drive, OneDrive, or a direct EOC link.
    pub url: String,
}

impl RatingRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("URL cannot be empty".to_string());
        }
        if self.url.len() > MAX_URL_LENGTH {
            return Err("URL too long".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    pub star_rating: f64,
    pub matched_measures: Vec<String>,
    pub detected_language: String,
    pub was_translated: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}
