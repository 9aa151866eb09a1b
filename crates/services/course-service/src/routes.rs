//! Route configuration.

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::health_routes;

use crate::handlers::course_handler;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes("course-service"))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/courses",
            get(course_handler::list_courses).post(course_handler::create_course),
        )
        .route(
            "/courses/:course_id",
            get(course_handler::get_course)
                .put(course_handler::update_course)
                .delete(course_handler::delete_course),
        )
        .with_state(state)
}
