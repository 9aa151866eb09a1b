//! Route configuration.

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::health_routes;

use crate::handlers::stats_handler;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes("analytics-service"))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/stats/enrollments", get(stats_handler::enrollment_counts))
        .route("/stats/popular_courses", get(stats_handler::popular_courses))
        .with_state(state)
}
