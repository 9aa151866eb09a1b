//! Route configuration.

use axum::{routing::get, routing::post, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::health_routes;

use crate::handlers::enrollment_handler;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes("enrollment-service"))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/enroll",
            post(enrollment_handler::enroll)
                .put(enrollment_handler::update_enrollment)
                .delete(enrollment_handler::delete_enrollment),
        )
        .route("/my-courses/:username", get(enrollment_handler::my_courses))
        .with_state(state)
}
