//! Analytics Service Library
//!
//! Enrollment counts and the popular-courses report, computed from local
//! tables only.

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

use storage::{CourseStore, Database, EnrollmentStore};

use crate::config::AnalyticsServiceConfig;
use crate::routes::create_router;
use crate::service::AnalyticsReporter;
use crate::state::AppState;

pub use storage::MigrateAction;

/// Run the analytics service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AnalyticsServiceConfig::from_env();
    config.service = config.service.with_address(host, port);
    serve(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AnalyticsServiceConfig::from_env();
    storage::run_migrations(&config.database.url, action).await
}

pub fn build_router(db: DatabaseConnection) -> Router {
    let analytics_service = Arc::new(AnalyticsReporter::new(
        Arc::new(EnrollmentStore::new(db.clone())),
        Arc::new(CourseStore::new(db.clone())),
    ));
    create_router(AppState {
        analytics_service,
        db,
    })
}

/// Serve with an already loaded configuration.
pub async fn serve(
    config: AnalyticsServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database.url).await?;

    let app = build_router(db.get_connection())
        .layer(TimeoutLayer::new(config.service.request_timeout))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.service.addr().parse()?;
    info!("Analytics service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
