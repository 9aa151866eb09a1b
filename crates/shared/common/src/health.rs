//! Health check route shared by every service.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;

use crate::response::HealthResponse;

/// `GET /health`, reporting database connectivity.
pub fn health_routes<S>(service: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    DatabaseConnection: FromRef<S>,
{
    Router::new().route(
        "/health",
        get(move |State(db): State<DatabaseConnection>| health_check(service, db)),
    )
}

async fn health_check(service: &'static str, db: DatabaseConnection) -> Response {
    let (status, database) = match db.ping().await {
        Ok(()) => (StatusCode::OK, "healthy".to_string()),
        Err(e) => {
            tracing::warn!(service, error = %e, "Database health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy".to_string())
        }
    };

    let body = HealthResponse {
        status: if status == StatusCode::OK { "healthy" } else { "degraded" }.to_string(),
        service: service.to_string(),
        database,
    };

    (status, Json(body)).into_response()
}
