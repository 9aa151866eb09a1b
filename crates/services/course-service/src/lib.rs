//! Course Service Library
//!
//! Owns the course catalogue and answers Course Authority lookups.

pub mod config;
pub mod handlers;
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

use storage::{CourseStore, Database};

use crate::config::CourseServiceConfig;
use crate::routes::create_router;
use crate::service::CourseManager;
use crate::state::AppState;

pub use storage::MigrateAction;

/// Run the course service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CourseServiceConfig::from_env();
    config.service = config.service.with_address(host, port);
    serve(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = CourseServiceConfig::from_env();
    storage::run_migrations(&config.database.url, action).await
}

pub fn build_router(db: DatabaseConnection) -> Router {
    let course_service = Arc::new(CourseManager::new(Arc::new(CourseStore::new(db.clone()))));
    create_router(AppState { course_service, db })
}

/// Serve with an already loaded configuration.
pub async fn serve(
    config: CourseServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database.url).await?;

    let app = build_router(db.get_connection())
        .layer(TimeoutLayer::new(config.service.request_timeout))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.service.addr().parse()?;
    info!("Course service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
