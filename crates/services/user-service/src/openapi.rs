//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{LoginRequest, RegisterRequest};
use crate::handlers::user_handler::UpdateUserRequest;
use crate::service::TokenResponse;
use common::{HealthResponse, MessageResponse};
use domain::UserResponse;

/// Scheme name referenced by `security(..)` on the protected handlers.
pub const BEARER_SCHEME: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "user-service",
        description = "Accounts, JWT login and the user lookup used by the enrollment service"
    ),
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        TokenResponse,
        UserResponse,
        UpdateUserRequest,
        MessageResponse,
        HealthResponse,
    )),
    modifiers(&BearerToken),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "User lookup and account management"),
    )
)]
pub struct ApiDoc;

/// Registers the JWT bearer scheme.
struct BearerToken;

impl Modify for BearerToken {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .build();

        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in ["/register", "/login", "/users", "/users/{username}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
