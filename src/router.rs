use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    health::{self, HealthResponse, health_check},
    rating::{
        self, calculate_star_rating,
        dtos::{ErrorResponse, RatingRequest, RatingResponse},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, rating::handlers::calculate_star_rating),
    components(schemas(RatingRequest, RatingResponse, ErrorResponse, HealthResponse)),
    tags(
        (name = "rating", description = "Evidence of Coverage star rating"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/calculate-star-rating", post(calculate_star_rating))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
