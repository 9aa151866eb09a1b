//! Application state for dependency injection.

use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::service::EnrollmentService;

#[derive(Clone)]
pub struct AppState {
    pub enrollment_service: Arc<dyn EnrollmentService>,
    pub db: DatabaseConnection,
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
