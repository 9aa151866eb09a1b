//! Application state for dependency injection.

use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::service::FeedbackService;

#[derive(Clone)]
pub struct AppState {
    pub feedback_service: Arc<dyn FeedbackService>,
    pub db: DatabaseConnection,
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
