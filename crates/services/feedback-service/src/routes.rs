//! Route configuration.

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::health_routes;

use crate::handlers::feedback_handler;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes("feedback-service"))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/feedback", post(feedback_handler::submit_feedback))
        .route("/feedback/:course_id", get(feedback_handler::list_feedback))
        .with_state(state)
}
