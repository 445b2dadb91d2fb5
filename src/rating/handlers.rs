use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::ACCEPT},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    app_state::AppState,
    pipeline::RatingOutcome,
    rating::dtos::{ErrorResponse, RatingRequest, RatingResponse},
};

#[utoipa::path(
    post,
    path = "/calculate-star-rating",
    tag = "rating",
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Star rating of the document", body = RatingResponse),
        (status = 400, description = "Unsupported link, download failure or invalid PDF", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Translation or internal failure", body = ErrorResponse)
    )
)]
pub async fn calculate_star_rating(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RatingRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(error = %rejection, "rejected request body");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    if let Err(detail) = payload.validate() {
        return error_response(StatusCode::BAD_REQUEST, detail);
    }

    match state.pipeline.rate(&payload.url).await {
        Ok(outcome) if prefers_plain_text(&headers) => {
            format!("{:.2}", outcome.result.rating).into_response()
        }
        Ok(outcome) => (StatusCode::OK, Json(RatingResponse::from(outcome))).into_response(),
        Err(err) => error_response(err.status_code(), err.detail()),
    }
}

impl From<RatingOutcome> for RatingResponse {
    fn from(outcome: RatingOutcome) -> Self {
        Self {
            star_rating: outcome.result.rating,
            matched_measures: outcome.result.matched_measures,
            detected_language: outcome.detected_language,
            was_translated: outcome.was_translated,
        }
    }
}

fn error_response(status: StatusCode, detail: String) -> Response {
    (status, Json(ErrorResponse { detail })).into_response()
}

fn prefers_plain_text(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/plain") && !accept.contains("application/json"))
}
