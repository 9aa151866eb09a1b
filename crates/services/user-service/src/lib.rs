//! User Service Library
//!
//! Registration, login and the User Authority lookup used by peer services.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use common::JwtConfig;
use storage::{Database, UserStore};

use crate::config::UserServiceConfig;
use crate::routes::create_router;
use crate::service::{Authenticator, UserManager};
use crate::state::AppState;

pub use storage::MigrateAction;

/// Run the user service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = UserServiceConfig::from_env()?;
    config.service = config.service.with_address(host, port);
    serve(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let database = common::DatabaseConfig::from_env("USER_SERVICE");
    storage::run_migrations(&database.url, action).await
}

/// Wire repositories and services into a router.
pub fn build_router(db: DatabaseConnection, jwt: JwtConfig) -> Router {
    let user_repo = Arc::new(UserStore::new(db.clone()));
    let auth_service = Arc::new(Authenticator::new(user_repo.clone(), jwt));
    let user_service = Arc::new(UserManager::new(user_repo));

    create_router(AppState::new(auth_service, user_service, db))
}

/// Serve with an already loaded configuration.
pub async fn serve(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database.url).await?;

    let app = build_router(db.get_connection(), config.jwt)
        .layer(TimeoutLayer::new(config.service.request_timeout))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.service.addr().parse()?;
    info!("User service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
