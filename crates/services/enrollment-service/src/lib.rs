//! Enrollment Service Library
//!
//! Orchestrates enrollments across the User Authority, the Course Authority
//! and the local enrollments table. One [`RemoteClient`] is built at startup
//! and shared by both authority clients.

pub mod clients;
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

use common::{RemoteClient, RemoteError};
use storage::{Database, EnrollmentStore};

use crate::clients::{HttpCourseCatalog, HttpUserDirectory};
use crate::config::EnrollmentServiceConfig;
use crate::routes::create_router;
use crate::service::EnrollmentManager;
use crate::state::AppState;

pub use storage::MigrateAction;

/// Run the enrollment service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EnrollmentServiceConfig::from_env()?;
    config.service = config.service.with_address(host, port);
    serve(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let database = common::DatabaseConfig::from_env("ENROLLMENT_SERVICE");
    storage::run_migrations(&database.url, action).await
}

/// Wire the remote client, repositories and orchestrator into a router
/// bounded by the request deadline.
pub fn build_router(
    config: &EnrollmentServiceConfig,
    db: DatabaseConnection,
) -> Result<Router, RemoteError> {
    let remote = RemoteClient::new(config.retry.clone())?;
    let users = Arc::new(HttpUserDirectory::new(
        remote.clone(),
        config.user_service_url.as_str(),
    )?);
    let courses = Arc::new(HttpCourseCatalog::new(
        remote,
        config.course_service_url.as_str(),
    )?);

    let enrollment_service = Arc::new(
        EnrollmentManager::new(Arc::new(EnrollmentStore::new(db.clone())), users, courses)
            .with_fanout_concurrency(config.fanout_concurrency)
            .with_unavailable_policy(config.unavailable_policy)
            .with_lookup_deadline(config.lookup_deadline),
    );

    Ok(create_router(AppState {
        enrollment_service,
        db,
    })
    .layer(TimeoutLayer::new(config.service.request_timeout)))
}

/// Serve with an already loaded configuration.
pub async fn serve(
    config: EnrollmentServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database.url).await?;

    let app = build_router(&config, db.get_connection())?.layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.service.addr().parse()?;
    info!(
        user_service = %config.user_service_url,
        course_service = %config.course_service_url,
        "Enrollment service listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
