//! Route configuration.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::health_routes;

use crate::handlers::{auth_handler, user_handler};
use crate::middleware::auth_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .merge(health_routes("user-service"))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/register", post(auth_handler::register))
        .route("/login", post(auth_handler::login))
        .route(
            "/users",
            get(user_handler::list_users).route_layer(auth.clone()),
        )
        // Lookup stays public for peer services; changes need a token
        .route(
            "/users/:username",
            get(user_handler::get_user).merge(
                put(user_handler::update_user)
                    .delete(user_handler::delete_user)
                    .route_layer(auth),
            ),
        )
        .with_state(state)
}
